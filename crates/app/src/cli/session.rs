use clap::Args;

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Admin email
    #[arg(long, env = "MESA_EMAIL")]
    email: String,

    /// Admin password
    #[arg(long, env = "MESA_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(context: &Context, args: LoginArgs) -> Result<(), String> {
    let admin = context
        .store
        .login(&args.email, &args.password)
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    println!("logged in as {}", admin.name.as_deref().unwrap_or(&admin.email));

    Ok(())
}

pub(crate) fn logout(context: &Context) {
    context.store.logout();

    println!("logged out");
}

pub(crate) async fn whoami(context: &Context) -> Result<(), String> {
    context.require_session().await?;

    let state = context.store.state();

    match state.auth.admin {
        Some(admin) => {
            println!("admin_id: {}", admin.id);
            println!("email: {}", admin.email);

            if let Some(name) = admin.name {
                println!("name: {name}");
            }

            Ok(())
        }
        None => Err("not logged in".to_string()),
    }
}
