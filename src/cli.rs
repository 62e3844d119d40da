use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "pg-posts-migrate")]
#[command(about = "Migrate posts from the PostgreSQL `post` table into ko/_posts Markdown files")]
#[command(
    long_about = "Migrate posts from the PostgreSQL `post` table into ko/_posts Markdown files.\n\n\
                  Connection parameters come from PG_HOST, PG_PORT, PG_DBNAME, PG_USER and PG_PASSWORD.\n\
                  Existing files are skipped unless --force is given (or FORCE=1 is set)."
)]
#[command(version)]
pub struct CliArgs {
    /// Overwrite posts that already exist in the output directory
    #[arg(long)]
    pub force: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }
}
