use crate::{
    config::{self, AppConfig, PlayerKind},
    error::Res,
    info, success, utils, warning,
};

/// Field updates requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub app_client_id: Option<String>,
    pub app_client_secret: Option<String>,
    pub redirect_port: Option<String>,
    pub player: Option<PlayerKind>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.app_client_id.is_none()
            && self.app_client_secret.is_none()
            && self.redirect_port.is_none()
            && self.player.is_none()
    }
}

/// Applies `update` to `config.json` and reports what is still missing.
///
/// Without any update the current settings are printed instead.
pub async fn configure(update: ConfigUpdate) -> Res<()> {
    let path = config::config_path();
    let (mut cfg, _) = AppConfig::load(&path).await?;

    if update.is_empty() {
        info!("Config file: {}", path.display());
        info!("appClientId: {}", cfg.app_client_id);
        info!("appClientSecret: {}", utils::mask_secret(&cfg.app_client_secret));
        info!("redirectPort: {}", cfg.redirect_port);
        info!("player: {:?}", cfg.player);
    }

    if let Some(id) = update.app_client_id {
        cfg.app_client_id = id;
        success!("Set appClientId.");
    }
    if let Some(secret) = update.app_client_secret {
        cfg.app_client_secret = secret;
        success!("Set appClientSecret.");
    }
    if let Some(port) = update.redirect_port {
        cfg.redirect_port = port;
        success!("Set redirectPort.");
    }
    if let Some(player) = update.player {
        cfg.player = player;
        success!("Set player.");
    }

    cfg.save(&path).await?;

    if let Err(e) = cfg.validate() {
        warning!("Config was saved but is incomplete: {}", e);
        warning!(
            "Create an application at https://developer.spotify.com/dashboard and register http://localhost:<redirectPort> as its redirect URI."
        );
        return Err(e);
    }
    Ok(())
}
