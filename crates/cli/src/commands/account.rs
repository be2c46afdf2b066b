//! Account and session commands.

use farm2door_core::AddressId;
use farm2door_store::models::{AddressFields, ProfileUpdate, SessionUser, SignupRequest};

use super::{CliError, Context};

fn print_session(session: &SessionUser) {
    tracing::info!("Signed in as {} <{}> [{}]", session.name, session.email, session.role);
}

/// Register a new account and sign it in.
///
/// # Errors
///
/// Returns [`CliError::Auth`] for validation failures or a taken email.
pub fn signup(
    ctx: &mut Context,
    name: String,
    email: String,
    password: String,
    phone: Option<String>,
) -> Result<(), CliError> {
    let session = ctx.auth.signup(SignupRequest {
        name,
        email,
        password,
        phone: phone.unwrap_or_default(),
        avatar: None,
    })?;
    print_session(&session);
    Ok(())
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns [`CliError::Auth`] for invalid credentials.
pub fn login(ctx: &mut Context, email: &str, password: &str) -> Result<(), CliError> {
    let session = ctx.auth.login(email, password)?;
    print_session(&session);
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns [`CliError::Storage`] if clearing the session fails.
pub fn logout(ctx: &mut Context) -> Result<(), CliError> {
    ctx.auth.logout().map_err(CliError::Storage)?;
    tracing::info!("Signed out");
    Ok(())
}

/// Print the current session, addresses included.
pub fn whoami(ctx: &Context) {
    match ctx.auth.current_user() {
        Some(session) => {
            print_session(session);
            if !session.phone.is_empty() {
                tracing::info!("Phone: {}", session.phone);
            }
            for address in &session.addresses {
                tracing::info!(
                    "  {:<14} {}: {}, {} {} ({})",
                    address.id,
                    address.label,
                    address.line,
                    address.zip,
                    address.city,
                    address.country
                );
            }
        }
        None => tracing::info!("Not signed in"),
    }
}

/// Update profile fields of the signed-in user.
///
/// # Errors
///
/// Returns [`CliError::Auth`] when nobody is signed in or the name is empty.
pub fn update(
    ctx: &mut Context,
    name: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
) -> Result<(), CliError> {
    let session = ctx.auth.update_profile(ProfileUpdate { name, phone, avatar })?;
    print_session(&session);
    Ok(())
}

/// Add a shipping address to the signed-in user.
///
/// # Errors
///
/// Returns [`CliError::Auth`] when nobody is signed in.
pub fn add_address(ctx: &mut Context, fields: AddressFields) -> Result<(), CliError> {
    let address = ctx.auth.add_address(fields)?;
    tracing::info!("Address {} added", address.id);
    Ok(())
}

/// Edit an existing address of the signed-in user.
///
/// # Errors
///
/// Returns [`CliError::Auth`] when nobody is signed in.
pub fn edit_address(ctx: &mut Context, id: &str, fields: AddressFields) -> Result<(), CliError> {
    let id = AddressId::new(id);
    if ctx.auth.edit_address(&id, fields)? {
        tracing::info!("Address {id} updated");
    } else {
        tracing::warn!("No address with ID {id}");
    }
    Ok(())
}

/// Remove an address from the signed-in user.
///
/// # Errors
///
/// Returns [`CliError::Auth`] when nobody is signed in.
pub fn remove_address(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    let id = AddressId::new(id);
    if ctx.auth.remove_address(&id)? {
        tracing::info!("Address {id} removed");
    } else {
        tracing::warn!("No address with ID {id}");
    }
    Ok(())
}

/// Reset the password of the account matching `email` and print the new one.
///
/// # Errors
///
/// Returns [`CliError::Auth`] for an unknown email.
pub fn reset_password(ctx: &mut Context, email: &str) -> Result<(), CliError> {
    let password = ctx.auth.reset_password(email)?;
    tracing::info!("New password for {email}: {password}");
    Ok(())
}
