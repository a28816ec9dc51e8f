use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "albums_view")]
#[command(about = "Per-user albums view: drift reconciliation and album listing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the albums view with the catalog and report drifts
    Reconcile {
        /// Owner to reconcile, repeatable. Defaults to `reconcile.owners` of the configuration
        #[arg(long = "owner")]
        owners: Vec<String>,

        /// Write corrections back into the view instead of only logging them
        #[arg(long)]
        fix: bool,
    },

    /// List the albums a user can see, most recent first
    #[command(alias = "ls")]
    ListAlbums {
        #[arg(long)]
        user: String,

        /// Owner identity managed by the user
        #[arg(long)]
        owner: Option<String>,

        /// Skip albums shared with the user
        #[arg(long)]
        only_owned: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_takes_repeated_owners() {
        let cli = Cli::parse_from([
            "albums_view",
            "reconcile",
            "--owner",
            "ironman",
            "--owner",
            "pepper",
            "--fix",
        ]);

        match cli.command {
            Commands::Reconcile { owners, fix } => {
                assert_eq!(owners, vec!["ironman".to_string(), "pepper".to_string()]);
                assert!(fix);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_list_albums_requires_user() {
        assert!(Cli::try_parse_from(["albums_view", "list-albums"]).is_err());

        let cli = Cli::parse_from(["albums_view", "ls", "--user", "tony", "--only-owned"]);
        match cli.command {
            Commands::ListAlbums {
                user,
                owner,
                only_owned,
            } => {
                assert_eq!(user, "tony");
                assert_eq!(owner, None);
                assert!(only_owned);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
