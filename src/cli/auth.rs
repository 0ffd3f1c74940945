use crate::{error::Res, success};

use super::{authorize, load_config};

/// Runs the authorization flow so later commands find valid tokens.
pub async fn auth() -> Res<()> {
    let config = load_config().await?;
    authorize(&config).await?;
    success!("Authorization successful!");
    Ok(())
}
