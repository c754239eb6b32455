use std::sync::Arc;

use kanal::AsyncSender;
use sakura_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_theme_toggle(
    context: &Arc<AppContext>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let theme = context.toggle_theme().await;
    tracing::debug!("Theme is now {}", theme.as_str());

    app_to_ui_tx.send(AppEvent::ThemeChanged(theme)).await?;
    Ok(())
}
