//! CLI command execution.
//!
//! Each command is a thin wrapper around one or two `ApiClient` calls that
//! prints the result as plain text.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use payfolio::models::{
    AccountUpdate, NewAccount, NewAsset, NewLiability, ProfileUpdate, TransactionFilter,
    UserProfile,
};
use payfolio::session::{FileSessionStore, SessionStore};
use payfolio::transport::RetryPolicy;
use payfolio::{ApiClient, ApiError, ClientConfig};
use rust_decimal::Decimal;

use super::args::{
    AccountsCommand, AssetsCommand, BillingCommand, Cli, Commands, InsightsCommand,
    LiabilitiesCommand, TransactionsCommand,
};

pub async fn execute(cli: Cli) -> Result<()> {
    let api = build_client(&cli)?;

    let result = match cli.command {
        Commands::Login { email, password } => login(&api, &email, &password).await,
        Commands::Register {
            email,
            name,
            password,
        } => register(&api, &email, &password, name.as_deref()).await,
        Commands::Logout => logout(&api).await,
        Commands::Refresh => refresh(&api).await,
        Commands::Whoami => whoami(&api).await,
        Commands::Profile {
            name,
            currency,
            theme,
        } => {
            let update = ProfileUpdate {
                full_name: name,
                currency,
                theme,
            };
            profile(&api, &update).await
        }
        Commands::DeleteAccount { yes } => delete_user(&api, yes).await,
        Commands::Portfolio => portfolio(&api).await,
        Commands::Accounts(command) => accounts(&api, command).await,
        Commands::Transactions(command) => transactions(&api, command).await,
        Commands::Assets(command) => assets(&api, command).await,
        Commands::Liabilities(command) => liabilities(&api, command).await,
        Commands::Insights(command) => insights(&api, command).await,
        Commands::Billing(command) => billing(&api, command).await,
    };

    if let Err(error) = &result {
        if error
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_unauthorized)
        {
            eprintln!("Hint: session missing or expired. Run `payfolio login <email>`.");
        }
    }
    result
}

fn build_client(cli: &Cli) -> Result<ApiClient> {
    let store: Arc<dyn SessionStore> = match &cli.session_file {
        Some(path) => Arc::new(FileSessionStore::at(path)),
        None => Arc::new(FileSessionStore::open_default().context("Failed to locate session file")?),
    };

    let mut config = ClientConfig::new(&cli.api_url);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if cli.retries > 0 {
        config = config.with_retry(RetryPolicy::with_retries(cli.retries));
    }

    ApiClient::new(&config, store).context("Failed to set up API client")
}

// === Session ===

async fn login(api: &ApiClient, email: &str, password: &str) -> Result<()> {
    let auth = api.login(email, password).await.context("Login failed")?;
    println!("Logged in as {}", auth.user.email);
    Ok(())
}

async fn register(
    api: &ApiClient,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<()> {
    let auth = api
        .register(email, password, name)
        .await
        .context("Registration failed")?;
    println!("Registered {} on the {} plan", auth.user.email, auth.user.plan);
    Ok(())
}

async fn logout(api: &ApiClient) -> Result<()> {
    api.logout().await.context("Failed to clear session")?;
    println!("Logged out.");
    Ok(())
}

async fn refresh(api: &ApiClient) -> Result<()> {
    api.refresh_session()
        .await
        .context("Failed to refresh session")?;
    println!("Session refreshed.");
    Ok(())
}

async fn whoami(api: &ApiClient) -> Result<()> {
    let user = api.current_user().await.context("Failed to fetch profile")?;
    print_user(&user);
    Ok(())
}

async fn profile(api: &ApiClient, update: &ProfileUpdate) -> Result<()> {
    let user = if update.is_empty() {
        api.profile().await.context("Failed to fetch profile")?
    } else {
        api.update_profile(update)
            .await
            .context("Failed to update profile")?
    };
    print_user(&user);
    println!("Theme:    {}", user.theme);
    Ok(())
}

async fn delete_user(api: &ApiClient, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("Deleting an account cannot be undone; pass --yes to confirm");
    }
    api.delete_user().await.context("Failed to delete account")?;
    println!("Account deleted. Logged out.");
    Ok(())
}

fn print_user(user: &UserProfile) {
    println!("ID:       {}", user.id);
    println!("Email:    {}", user.email);
    println!("Name:     {}", user.full_name.as_deref().unwrap_or("-"));
    println!("Plan:     {}", user.plan);
    println!("Currency: {}", user.currency);
    println!("Joined:   {}", user.created_at.format("%Y-%m-%d"));
}

async fn portfolio(api: &ApiClient) -> Result<()> {
    let portfolio = api.portfolio().await.context("Failed to fetch portfolio")?;
    let breakdown = &portfolio.breakdown;

    println!("Net worth:         {}", money(portfolio.net_worth));
    println!(
        "Change:            {} ({:+.2}%)",
        money(portfolio.net_worth_change),
        portfolio.net_worth_change_percent
    );
    println!("Total assets:      {}", money(portfolio.total_assets));
    println!("Total liabilities: {}", money(portfolio.total_liabilities));
    println!();
    println!("{:<16} {:>16}", "CATEGORY", "VALUE");
    println!("{}", "-".repeat(33));
    for (label, value) in [
        ("Banks", breakdown.banks),
        ("Investments", breakdown.investments),
        ("Crypto", breakdown.crypto),
        ("Wallets", breakdown.wallets),
        ("Manual assets", breakdown.manual_assets),
    ] {
        println!("{:<16} {:>16}", label, money(value));
    }
    println!();
    println!(
        "{} connected accounts, updated {}",
        portfolio.connected_accounts,
        portfolio.last_updated.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

// === Accounts ===

async fn accounts(api: &ApiClient, command: AccountsCommand) -> Result<()> {
    match command {
        AccountsCommand::List => {
            let list = api.accounts().await.context("Failed to list accounts")?;
            if list.accounts.is_empty() {
                println!("No accounts found.");
                return Ok(());
            }

            println!(
                "{:<36} {:<24} {:<12} {:>16} {:<8}",
                "ID", "NAME", "TYPE", "BALANCE", "SYNC"
            );
            println!("{}", "-".repeat(100));
            for account in &list.accounts {
                println!(
                    "{:<36} {:<24} {:<12} {:>16} {:<8}",
                    account.id,
                    truncate(&account.name, 24),
                    account.account_type.as_deref().unwrap_or("-"),
                    format!("{} {}", money(account.current_balance), account.currency),
                    account.sync_status,
                );
            }
            let by_type: Vec<String> = list
                .by_type
                .iter()
                .map(|(kind, count)| format!("{kind}: {count}"))
                .collect();
            println!("\n{} accounts ({})", list.total, by_type.join(", "));
        }
        AccountsCommand::Show { id } => {
            let account = api.account(id).await.context("Failed to fetch account")?;
            println!("ID:          {}", account.id);
            println!("Name:        {}", account.name);
            println!("Institution: {}", account.institution.as_deref().unwrap_or("-"));
            println!("Type:        {}", account.account_type.as_deref().unwrap_or("-"));
            println!(
                "Balance:     {} {}",
                money(account.current_balance),
                account.currency
            );
            println!("Connection:  {}", account.connection_type);
            println!("Sync status: {}", account.sync_status);
            if let Some(synced) = account.last_synced_at {
                println!("Last synced: {}", synced.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        AccountsCommand::Create {
            name,
            institution,
            account_type,
            balance,
            currency,
        } => {
            let new = NewAccount {
                institution,
                account_type,
                current_balance: balance,
                currency,
                ..NewAccount::new(name)
            };
            let account = api
                .create_account(&new)
                .await
                .context("Failed to create account")?;
            println!("Created account {} ({})", account.name, account.id);
        }
        AccountsCommand::Update {
            id,
            name,
            institution,
            balance,
            hidden,
        } => {
            let update = AccountUpdate {
                name,
                institution,
                current_balance: balance,
                is_hidden: hidden,
            };
            if update == AccountUpdate::default() {
                bail!("Nothing to update; pass at least one of --name, --institution, --balance, --hidden");
            }
            let account = api
                .update_account(id, &update)
                .await
                .context("Failed to update account")?;
            println!("Updated account {} ({})", account.name, account.id);
        }
        AccountsCommand::Delete { id } => {
            api.delete_account(id)
                .await
                .context("Failed to delete account")?;
            println!("Deleted account {id}");
        }
        AccountsCommand::Sync { id } => {
            let result = api.sync_account(id).await.context("Failed to sync account")?;
            println!("{}", result.message);
        }
    }
    Ok(())
}

// === Transactions ===

async fn transactions(api: &ApiClient, command: TransactionsCommand) -> Result<()> {
    match command {
        TransactionsCommand::List {
            account,
            category,
            kind,
            from,
            to,
            limit,
            offset,
        } => {
            let filter = TransactionFilter {
                account_id: account,
                category_id: category,
                transaction_type: kind,
                date_from: from.map(start_of_day),
                date_to: to.map(end_of_day),
                limit,
                offset,
            };
            let page = api
                .transactions(&filter)
                .await
                .context("Failed to list transactions")?;
            if page.transactions.is_empty() {
                println!("No transactions found.");
                return Ok(());
            }

            println!(
                "{:<36} {:<10} {:<8} {:>14} {:<20} {}",
                "ID", "DATE", "TYPE", "AMOUNT", "CATEGORY", "DESCRIPTION"
            );
            println!("{}", "-".repeat(110));
            for txn in &page.transactions {
                let description = txn
                    .merchant_name
                    .as_deref()
                    .or(txn.description.as_deref())
                    .unwrap_or("-");
                println!(
                    "{:<36} {:<10} {:<8} {:>14} {:<20} {}",
                    txn.id,
                    txn.transaction_date.format("%Y-%m-%d"),
                    txn.transaction_type.as_deref().unwrap_or("-"),
                    money(txn.amount),
                    truncate(txn.category.as_ref().map_or("-", |c| c.name.as_str()), 20),
                    truncate(description, 30),
                );
            }
            let shown = u64::try_from(page.transactions.len()).unwrap_or(u64::MAX);
            println!(
                "\nShowing {}-{} of {}",
                u64::from(page.offset) + 1,
                u64::from(page.offset) + shown,
                page.total
            );
        }
        TransactionsCommand::Show { id } => {
            let txn = api
                .transaction(id)
                .await
                .context("Failed to fetch transaction")?;
            println!("ID:          {}", txn.id);
            println!(
                "Account:     {}",
                txn.account_name
                    .clone()
                    .unwrap_or_else(|| txn.account_id.to_string())
            );
            println!("Date:        {}", txn.transaction_date.format("%Y-%m-%d %H:%M"));
            println!("Type:        {}", txn.transaction_type.as_deref().unwrap_or("-"));
            println!("Amount:      {}", money(txn.amount));
            println!("Merchant:    {}", txn.merchant_name.as_deref().unwrap_or("-"));
            println!("Description: {}", txn.description.as_deref().unwrap_or("-"));
            println!(
                "Category:    {}",
                txn.category.as_ref().map_or("-", |c| c.name.as_str())
            );
            if txn.is_recurring {
                println!("Recurring:   yes");
            }
        }
        TransactionsCommand::Delete { id } => {
            api.delete_transaction(id)
                .await
                .context("Failed to delete transaction")?;
            println!("Deleted transaction {id}");
        }
        TransactionsCommand::Stats { from, to } => {
            if to < from {
                bail!("--to ({to}) is before --from ({from})");
            }
            let stats = api
                .transaction_stats(start_of_day(from), end_of_day(to))
                .await
                .context("Failed to fetch transaction stats")?;
            println!("Period:   {from} to {to}");
            println!("Income:   {}", money(stats.total_income));
            println!("Expenses: {}", money(stats.total_expenses));
            println!("Net:      {}", money(stats.net_cash_flow));
            if !stats.by_category.is_empty() {
                println!("\nBy category:");
                for entry in &stats.by_category {
                    println!("  {entry}");
                }
            }
            if !stats.top_merchants.is_empty() {
                println!("\nTop merchants:");
                for entry in &stats.top_merchants {
                    println!("  {entry}");
                }
            }
        }
    }
    Ok(())
}

// === Assets & liabilities ===

async fn assets(api: &ApiClient, command: AssetsCommand) -> Result<()> {
    match command {
        AssetsCommand::List => {
            let assets = api.assets().await.context("Failed to list assets")?;
            if assets.is_empty() {
                println!("No assets found.");
                return Ok(());
            }

            println!(
                "{:<36} {:<24} {:<12} {:>16} {:>10}",
                "ID", "NAME", "TYPE", "VALUE", "GAIN %"
            );
            println!("{}", "-".repeat(102));
            for asset in &assets {
                println!(
                    "{:<36} {:<24} {:<12} {:>16} {:>10}",
                    asset.id,
                    truncate(&asset.name, 24),
                    asset.asset_type.as_deref().unwrap_or("-"),
                    money(asset.current_value),
                    asset
                        .gain_percent
                        .map_or_else(|| "-".to_string(), |p| format!("{p:+.2}")),
                );
            }
        }
        AssetsCommand::Show { id } => {
            let asset = api.asset(id).await.context("Failed to fetch asset")?;
            println!("ID:       {}", asset.id);
            println!("Name:     {}", asset.name);
            println!("Type:     {}", asset.asset_type.as_deref().unwrap_or("-"));
            println!("Value:    {}", money(asset.current_value));
            if let Some(purchase) = asset.purchase_value {
                println!("Paid:     {}", money(purchase));
            }
            if let (Some(gain), Some(percent)) = (asset.gain, asset.gain_percent) {
                println!("Gain:     {} ({percent:+.2}%)", money(gain));
            }
        }
        AssetsCommand::Create {
            name,
            asset_type,
            value,
            purchase_value,
            purchase_date,
            notes,
        } => {
            let new = NewAsset {
                name,
                asset_type,
                current_value: value,
                purchase_value,
                purchase_date: purchase_date.map(start_of_day),
                notes,
            };
            let asset = api.create_asset(&new).await.context("Failed to create asset")?;
            println!("Created asset {} ({})", asset.name, asset.id);
        }
        AssetsCommand::Delete { id } => {
            api.delete_asset(id).await.context("Failed to delete asset")?;
            println!("Deleted asset {id}");
        }
    }
    Ok(())
}

async fn liabilities(api: &ApiClient, command: LiabilitiesCommand) -> Result<()> {
    match command {
        LiabilitiesCommand::List => {
            let list = api
                .liabilities()
                .await
                .context("Failed to list liabilities")?;
            if list.liabilities.is_empty() {
                println!("No liabilities found.");
                return Ok(());
            }

            println!(
                "{:<36} {:<24} {:<14} {:>16} {:>12}",
                "ID", "NAME", "TYPE", "BALANCE", "EMI"
            );
            println!("{}", "-".repeat(106));
            for liability in &list.liabilities {
                println!(
                    "{:<36} {:<24} {:<14} {:>16} {:>12}",
                    liability.id,
                    truncate(&liability.name, 24),
                    liability.liability_type.as_deref().unwrap_or("-"),
                    money(liability.current_balance),
                    liability.emi_amount.map_or_else(|| "-".to_string(), money),
                );
            }
            println!(
                "\nOutstanding: {}   Monthly EMI: {}",
                money(list.total_liability),
                money(list.monthly_emi_total)
            );
        }
        LiabilitiesCommand::Show { id } => {
            let liability = api
                .liability(id)
                .await
                .context("Failed to fetch liability")?;
            let optional = |amount: Option<Decimal>| amount.map_or_else(|| "-".to_string(), money);
            println!("ID:        {}", liability.id);
            println!("Name:      {}", liability.name);
            println!(
                "Type:      {}",
                liability.liability_type.as_deref().unwrap_or("-")
            );
            println!("Lender:    {}", liability.lender.as_deref().unwrap_or("-"));
            println!("Balance:   {}", money(liability.current_balance));
            println!("Principal: {}", optional(liability.principal_amount));
            println!("Rate %:    {}", optional(liability.interest_rate));
            println!("EMI:       {}", optional(liability.emi_amount));
            if let Some(paid) = liability.paid_percent {
                println!("Paid:      {paid:.1}%");
            }
        }
        LiabilitiesCommand::Create {
            name,
            liability_type,
            balance,
            principal,
            rate,
            emi,
            emi_day,
            lender,
        } => {
            let new = NewLiability {
                name,
                liability_type,
                current_balance: balance,
                principal_amount: principal,
                interest_rate: rate,
                emi_amount: emi,
                emi_day,
                lender,
            };
            let liability = api
                .create_liability(&new)
                .await
                .context("Failed to create liability")?;
            println!("Created liability {} ({})", liability.name, liability.id);
        }
        LiabilitiesCommand::Delete { id } => {
            api.delete_liability(id)
                .await
                .context("Failed to delete liability")?;
            println!("Deleted liability {id}");
        }
    }
    Ok(())
}

// === Insights & billing ===

async fn insights(api: &ApiClient, command: InsightsCommand) -> Result<()> {
    match command {
        InsightsCommand::List => {
            let list = api.insights().await.context("Failed to list insights")?;
            if list.insights.is_empty() {
                println!("No insights yet. Try `payfolio insights generate`.");
                return Ok(());
            }

            println!("{} unread\n", list.unread_count);
            for insight in &list.insights {
                let marker = if insight.is_read { " " } else { "*" };
                println!(
                    "{marker} [{}] {} ({})",
                    insight.severity, insight.title, insight.id
                );
                println!("    {}", insight.description);
                if let (Some(text), Some(link)) = (&insight.cta_text, &insight.cta_link) {
                    println!("    {text}: {link}");
                }
                println!();
            }
        }
        InsightsCommand::Generate => {
            let outcome = api
                .generate_insights()
                .await
                .context("Failed to generate insights")?;
            if let Some(error) = &outcome.error {
                bail!("{}: {error}", outcome.message);
            }
            println!("{}", outcome.message);
        }
        InsightsCommand::Read { id } => {
            api.mark_insight_read(id)
                .await
                .context("Failed to mark insight read")?;
            println!("Marked insight {id} as read");
        }
        InsightsCommand::Dismiss { id } => {
            api.dismiss_insight(id)
                .await
                .context("Failed to dismiss insight")?;
            println!("Dismissed insight {id}");
        }
    }
    Ok(())
}

async fn billing(api: &ApiClient, command: BillingCommand) -> Result<()> {
    match command {
        BillingCommand::Subscription => {
            let subscription = api
                .subscription()
                .await
                .context("Failed to fetch subscription")?;
            println!("Plan:         {}", subscription.plan);
            println!("Status:       {}", subscription.status);
            println!("Billing:      {}", subscription.billing_cycle);
            println!("Max accounts: {}", subscription.max_accounts);
            if let Some(end) = subscription.current_period_end {
                println!("Renews:       {}", end.format("%Y-%m-%d"));
            }
        }
        BillingCommand::Checkout { plan, cycle, open } => {
            let session = api
                .create_checkout(plan, cycle)
                .await
                .context("Failed to start checkout")?;
            println!("Checkout: {}", session.checkout_url);
            if open {
                open::that(&session.checkout_url).with_context(|| {
                    format!("Failed to open browser for {}", session.checkout_url)
                })?;
            }
        }
    }
    Ok(())
}

// === Formatting helpers ===

fn money(amount: Decimal) -> String {
    amount.round_dp(2).to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last microsecond of the day, the finest step the server stores.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + TimeDelta::days(1) - TimeDelta::microseconds(1)
}
