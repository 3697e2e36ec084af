//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use payfolio::models::{BillingCycle, Plan, TransactionKind};
use payfolio::DEFAULT_API_URL;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Payfolio - your money, from the terminal
#[derive(Parser, Debug)]
#[command(name = "payfolio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API root URL
    #[arg(long, global = true, env = "PAYFOLIO_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long, global = true, env = "PAYFOLIO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Session file (default: ~/.payfolio/session.json)
    #[arg(long, global = true, env = "PAYFOLIO_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Retry requests that fail to reach the server this many times
    #[arg(long, global = true, default_value_t = 0)]
    pub retries: u32,

    /// Log every API call to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        email: String,

        /// Password (prefer the environment variable)
        #[arg(long, env = "PAYFOLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Register {
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        #[arg(long, env = "PAYFOLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Swap the stored refresh token for a fresh access token
    Refresh,

    /// Show the logged-in user
    Whoami,

    /// Show the profile, or change it when any option is given
    Profile {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Preferred currency code, e.g. INR or USD
        #[arg(long)]
        currency: Option<String>,

        /// light, dark or system
        #[arg(long)]
        theme: Option<String>,
    },

    /// Permanently delete your Payfolio account
    DeleteAccount {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Net worth and breakdown
    Portfolio,

    /// Bank, wallet and investment accounts
    #[command(subcommand)]
    Accounts(AccountsCommand),

    #[command(subcommand)]
    Transactions(TransactionsCommand),

    /// Manually tracked assets
    #[command(subcommand)]
    Assets(AssetsCommand),

    /// Loans, cards and EMIs
    #[command(subcommand)]
    Liabilities(LiabilitiesCommand),

    #[command(subcommand)]
    Insights(InsightsCommand),

    /// Plan and checkout
    #[command(subcommand)]
    Billing(BillingCommand),
}

#[derive(Subcommand, Debug)]
pub enum AccountsCommand {
    List,
    Show {
        id: Uuid,
    },
    Create {
        name: String,

        #[arg(long)]
        institution: Option<String>,

        /// bank, wallet, investment, crypto, ...
        #[arg(long = "type", default_value = "bank")]
        account_type: String,

        #[arg(long, default_value_t = Decimal::ZERO)]
        balance: Decimal,

        #[arg(long, default_value = "INR")]
        currency: String,
    },
    Update {
        id: Uuid,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        institution: Option<String>,

        #[arg(long)]
        balance: Option<Decimal>,

        /// Hide or unhide the account from totals
        #[arg(long)]
        hidden: Option<bool>,
    },
    Delete {
        id: Uuid,
    },
    /// Re-sync a connected account
    Sync {
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum TransactionsCommand {
    /// List transactions, newest first
    List {
        #[arg(long)]
        account: Option<Uuid>,

        #[arg(long)]
        category: Option<i64>,

        /// credit, debit or transfer
        #[arg(long = "type")]
        kind: Option<TransactionKind>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },
    Show {
        id: Uuid,
    },
    Delete {
        id: Uuid,
    },
    /// Income, expenses and top categories for a date range
    Stats {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssetsCommand {
    List,
    Show {
        id: Uuid,
    },
    Create {
        name: String,

        /// real_estate, vehicle, gold, collectible or other
        #[arg(long = "type", default_value = "other")]
        asset_type: String,

        #[arg(long)]
        value: Decimal,

        #[arg(long)]
        purchase_value: Option<Decimal>,

        /// YYYY-MM-DD
        #[arg(long)]
        purchase_date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum LiabilitiesCommand {
    List,
    Show {
        id: Uuid,
    },
    Create {
        name: String,

        /// home_loan, car_loan, personal_loan, credit_card, emi, bnpl or other
        #[arg(long = "type", default_value = "other")]
        liability_type: String,

        /// Outstanding balance
        #[arg(long)]
        balance: Decimal,

        #[arg(long)]
        principal: Option<Decimal>,

        /// Annual interest rate in percent
        #[arg(long)]
        rate: Option<Decimal>,

        #[arg(long)]
        emi: Option<Decimal>,

        /// Day of month the EMI is debited
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
        emi_day: Option<u8>,

        #[arg(long)]
        lender: Option<String>,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum InsightsCommand {
    List,
    /// Ask the server for fresh insights
    Generate,
    Read {
        id: Uuid,
    },
    Dismiss {
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum BillingCommand {
    Subscription,
    /// Start a checkout for a paid plan
    Checkout {
        /// pro or business
        plan: Plan,

        /// monthly or yearly
        #[arg(long, default_value = "monthly")]
        cycle: BillingCycle,

        /// Open the checkout page in the browser
        #[arg(long)]
        open: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "payfolio",
            "accounts",
            "list",
            "--api-url",
            "http://127.0.0.1:9000/v1",
            "--retries",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://127.0.0.1:9000/v1");
        assert_eq!(cli.retries, 2);
        assert!(matches!(cli.command, Commands::Accounts(AccountsCommand::List)));
    }

    #[test]
    fn checkout_parses_plan_and_cycle() {
        let cli = Cli::try_parse_from([
            "payfolio", "billing", "checkout", "pro", "--cycle", "yearly", "--open",
        ])
        .unwrap();

        match cli.command {
            Commands::Billing(BillingCommand::Checkout { plan, cycle, open }) => {
                assert_eq!(plan, Plan::Pro);
                assert_eq!(cycle, BillingCycle::Yearly);
                assert!(open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_plan_is_rejected() {
        let result = Cli::try_parse_from(["payfolio", "billing", "checkout", "enterprise"]);
        assert!(result.is_err());
    }

    #[test]
    fn transaction_filters_parse() {
        let cli = Cli::try_parse_from([
            "payfolio",
            "transactions",
            "list",
            "--type",
            "debit",
            "--from",
            "2025-01-01",
            "--limit",
            "20",
        ])
        .unwrap();

        match cli.command {
            Commands::Transactions(TransactionsCommand::List {
                kind, from, limit, ..
            }) => {
                assert_eq!(kind, Some(TransactionKind::Debit));
                assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1));
                assert_eq!(limit, Some(20));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn profile_options_are_optional() {
        let cli = Cli::try_parse_from(["payfolio", "profile", "--currency", "USD"]).unwrap();

        match cli.command {
            Commands::Profile {
                name,
                currency,
                theme,
            } => {
                assert_eq!(name, None);
                assert_eq!(currency.as_deref(), Some("USD"));
                assert_eq!(theme, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_subcommands_take_an_id() {
        let id = "01926f3b-1111-7222-8333-444455556666";

        let cli = Cli::try_parse_from(["payfolio", "assets", "show", id]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Assets(AssetsCommand::Show { id: parsed }) if parsed.to_string() == id
        ));

        let cli = Cli::try_parse_from(["payfolio", "liabilities", "show", id]).unwrap();
        assert!(matches!(cli.command, Commands::Liabilities(LiabilitiesCommand::Show { .. })));

        assert!(Cli::try_parse_from(["payfolio", "assets", "show", "not-a-uuid"]).is_err());
    }

    #[test]
    fn page_size_is_bounded() {
        let result =
            Cli::try_parse_from(["payfolio", "transactions", "list", "--limit", "500"]);
        assert!(result.is_err());
    }
}
