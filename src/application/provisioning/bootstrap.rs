use tracing::{info, warn};

use crate::domain::{NewUser, ProvisioningStore, UserResolution};
use crate::support::{is_unique_violation, ProvisionError};

/// Make sure at least one user exists and return the one that will own keys.
///
/// With users present the first one (lowest id) is reused. Otherwise `admin`
/// is inserted. If a concurrent run inserts the same admin first, the unique
/// email constraint rejects our insert and the winner's row is reused.
pub async fn ensure_default_user<S>(
    store: &S,
    admin: &NewUser,
) -> Result<UserResolution, ProvisionError>
where
    S: ProvisioningStore + ?Sized,
{
    let count = store.count_users().await?;
    info!("📊 Found {} users in database", count);

    if count > 0 {
        let user = store.first_user().await?.ok_or(ProvisionError::MissingUser)?;
        info!("👤 Using existing user: {} (ID: {})", user.email, user.id);
        return Ok(UserResolution::Existing(user));
    }

    info!("👤 No users found. Creating admin user...");
    match store.insert_user(admin.clone()).await {
        Ok(user) => {
            info!("✅ Created user: {} (ID: {})", user.email, user.id);
            Ok(UserResolution::Created(user))
        }
        Err(ProvisionError::Database(e)) if is_unique_violation(&e) => {
            warn!("Admin user was created by a concurrent run, reusing it");
            let user = store.first_user().await?.ok_or(ProvisionError::MissingUser)?;
            info!("👤 Using existing user: {} (ID: {})", user.email, user.id);
            Ok(UserResolution::Existing(user))
        }
        Err(e) => Err(e),
    }
}
