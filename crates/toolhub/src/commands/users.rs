use colored::Colorize;
use toolhub::service::UserService;
use toolhub::Lookup;
use toolhub_core::users::{NewUser, User, UserPatch};

use super::{format_json, Global};
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "users")]
#[command(about = "User account operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List every user
    #[clap(name = "list")]
    List(OutputOptions),

    /// Show a single user
    #[clap(name = "get")]
    Get(IdOptions),

    /// List administrators
    #[clap(name = "admins")]
    Admins(OutputOptions),

    /// Find a user by email (exact match)
    #[clap(name = "email")]
    Email(EmailOptions),

    /// Create a new user
    #[clap(name = "create")]
    Create(CreateOptions),

    /// Update fields of an existing user
    #[clap(name = "update")]
    Update(UpdateOptions),

    /// Delete a user
    #[clap(name = "delete")]
    Delete(IdOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct IdOptions {
    /// User ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct EmailOptions {
    #[arg(value_name = "EMAIL")]
    pub email: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CreateOptions {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Grant administrator rights
    #[arg(long)]
    pub admin: bool,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct UpdateOptions {
    /// User ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Set or clear administrator rights
    #[arg(long)]
    pub admin: Option<bool>,

    #[clap(flatten)]
    pub output: OutputOptions,
}

impl From<&UpdateOptions> for UserPatch {
    fn from(options: &UpdateOptions) -> Self {
        UserPatch {
            name: options.name.clone(),
            email: options.email.clone(),
            is_admin: options.admin,
        }
    }
}

pub async fn run(app: App, global: Global) -> Result<()> {
    let users = UserService::new(global.slots()?, global.config());

    match app.command {
        Commands::List(output) => print_users(&users.get_all().await, "ALL USERS", &output),
        Commands::Get(options) => {
            let user = users.get_by_id(&options.id).await;
            print_lookup(&user, &options.id, &options.output)
        }
        Commands::Admins(output) => {
            print_users(&users.get_admins().await, "ADMINISTRATORS", &output)
        }
        Commands::Email(options) => {
            let user = users.get_by_email(&options.email).await;
            print_lookup(&user, &options.email, &options.output)
        }
        Commands::Create(options) => {
            let new = NewUser {
                name: options.name,
                email: options.email,
                is_admin: options.admin,
            };
            let created = users
                .create(new)
                .await
                .map_err(|e| eyre!("Failed to create user: {}", e))?;
            print_lookup(&Lookup::Found(created), "", &options.output)
        }
        Commands::Update(options) => {
            let patch = UserPatch::from(&options);
            if patch.is_empty() {
                eprintln!("{}", "No fields given, the user is saved unchanged.".yellow());
            }
            let updated = users
                .update(&options.id, patch)
                .await
                .map_err(|e| eyre!("Failed to update user {}: {}", options.id, e))?;
            print_lookup(&updated, &options.id, &options.output)
        }
        Commands::Delete(options) => {
            let removed = users
                .delete(&options.id)
                .await
                .map_err(|e| eyre!("Failed to delete user {}: {}", options.id, e))?;
            if options.output.json {
                println!("{}", serde_json::json!({ "id": options.id, "deleted": removed }));
            } else if removed {
                println!("{} {}", "Deleted user".green(), options.id.bright_white());
            } else {
                println!("{} {}", "No user with ID".yellow(), options.id.bright_white());
            }
            Ok(())
        }
    }
}

fn print_users(users: &[User], header: &str, output: &OutputOptions) -> Result<()> {
    if output.json {
        println!("{}", format_json(users)?);
    } else {
        println!("{}", format_users_text(users, header));
    }
    Ok(())
}

fn print_lookup(user: &Lookup<User>, key: &str, output: &OutputOptions) -> Result<()> {
    if output.json {
        println!("{}", format_json(user)?);
        return Ok(());
    }

    match user {
        Lookup::Found(user) => {
            println!("{}", format_users_text(std::slice::from_ref(user), "USER"))
        }
        Lookup::NotFound => println!("{} {}", "No user matching".yellow(), key.bright_white()),
    }
    Ok(())
}

fn format_users_text(users: &[User], header: &str) -> String {
    let mut result = format!("\n{}\n", header.bright_cyan().bold());

    if users.is_empty() {
        result.push_str(&format!("\n{}\n", "No users found.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Email".bold().cyan(),
        "Role".bold().cyan(),
        "Joined".bold().cyan()
    ]);

    for user in users {
        let role = if user.is_admin {
            "admin".bright_magenta()
        } else {
            "member".normal()
        };
        table.add_row(prettytable::row![
            user.id.bright_white(),
            user.name,
            user.email.cyan(),
            role,
            user.created_at.format("%Y-%m-%d").to_string().bright_black()
        ]);
    }

    result.push_str(&table.to_string());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolhub_core::users::seed_users;

    #[test]
    fn test_format_users_text_marks_admins() {
        colored::control::set_override(false);
        let text = format_users_text(&seed_users(), "ALL USERS");

        assert!(text.contains("admin@toolhub.dev"));
        assert_eq!(text.matches("member").count(), 2);
    }

    #[test]
    fn test_update_options_to_patch() {
        use clap::Parser;

        #[derive(Debug, clap::Parser)]
        struct Harness {
            #[command(subcommand)]
            command: Commands,
        }

        let patch_for = |args: &[&str]| match Harness::try_parse_from(args).unwrap().command {
            Commands::Update(options) => UserPatch::from(&options),
            other => panic!("unexpected command: {:?}", other),
        };

        assert!(patch_for(&["users", "update", "2"]).is_empty());

        let promote = patch_for(&["users", "update", "2", "--admin", "true"]);
        assert!(!promote.is_empty());
        assert_eq!(promote.is_admin, Some(true));
        assert!(promote.name.is_none());
    }

    #[test]
    fn test_format_users_text_empty() {
        colored::control::set_override(false);
        assert!(format_users_text(&[], "ADMINISTRATORS").contains("No users found."));
    }
}
