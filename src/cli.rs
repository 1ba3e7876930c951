use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blogmesh")]
#[command(about = "Blogmesh services: edge gateway, auth, blog, comment and profile", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the edge gateway (default port 3000)
    Gateway,
    /// Run the auth service (default port 3001)
    Auth,
    /// Run the blog service (default port 3002)
    Blog,
    /// Run the comment service (default port 3003)
    Comment,
    /// Run the profile service (default port 3004)
    Profile,
    /// Apply database migrations to DATABASE_URL
    Migrate,
}

impl Command {
    /// Service name used in logs, health payloads and the gateway report.
    pub fn service_name(self) -> &'static str {
        match self {
            Command::Gateway => "api-gateway",
            Command::Auth => "auth-service",
            Command::Blog => "blog-service",
            Command::Comment => "comment-service",
            Command::Profile => "profile-service",
            Command::Migrate => "migrate",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Command::Gateway | Command::Migrate => 3000,
            Command::Auth => 3001,
            Command::Blog => 3002,
            Command::Comment => 3003,
            Command::Profile => 3004,
        }
    }
}
