//! Vayuhu command line client

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vayuhu_api::{reports, ApiClient, TerminalWidget};
use vayuhu_checkout::{
    buy_booking_visitor_pass, buy_visitor_pass, checkout_cart, Cart, CheckoutOrchestrator,
    CheckoutOutcome, CheckoutSettings,
};
use vayuhu_core::{PaymentWidget, SessionProvider};
use vayuhu_shared::models::visitor::{AdminVisitor, VisitorPass};
use vayuhu_shared::{CartItem, Identity, Session};
use vayuhu_store::{AppConfig, FileSessionStore};

#[derive(Debug, Parser)]
#[command(name = "vayuhu", about = "Vayuhu workspace booking client", long_about = None)]
struct Cli {
    /// Directory holding default.toml / <RUN_MODE>.toml / local.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Login(Credentials),
    Signup(SignupArgs),
    AdminLogin(Credentials),
    Logout,
    /// Show the signed-in identity
    Whoami {
        /// Also check the token against the backend
        #[arg(long)]
        remote: bool,
    },
    /// All reservations with dashboard counts (admin)
    Reservations(ListArgs),
    /// Your workspace bookings
    Bookings {
        /// Only bookings starting today
        #[arg(long)]
        today: bool,
    },
    /// Booking counts and recent bookings
    Summary,
    /// Visitors you registered, or every visitor with --all (admin)
    Visitors {
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Monthly revenue (admin)
    Revenue,
    Blogs,
    /// Pay for a single workspace booking
    Book(BookArgs),
    /// Buy a visitor pass
    VisitorPass(VisitorPassArgs),
    /// Register a walk-in visitor without payment (admin)
    WalkIn(VisitorArgs),
}

#[derive(Debug, Args)]
struct Credentials {
    #[arg(long)]
    email: String,

    #[arg(long, env = "VAYUHU_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct SignupArgs {
    #[arg(long)]
    name: String,

    #[command(flatten)]
    credentials: Credentials,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive filter
    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 10)]
    per_page: usize,
}

#[derive(Debug, Args)]
struct BookArgs {
    #[arg(long)]
    space_id: i64,

    #[arg(long)]
    title: String,

    #[arg(long, default_value = "daily")]
    plan_type: String,

    #[arg(long)]
    start_date: NaiveDate,

    #[arg(long)]
    end_date: NaiveDate,

    #[arg(long)]
    amount: Decimal,

    #[arg(long)]
    coupon: Option<String>,

    #[arg(long)]
    seat_codes: Option<String>,

    #[command(flatten)]
    widget: WidgetArgs,
}

#[derive(Debug, Args)]
struct VisitorArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    contact: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    company: String,

    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    date: String,

    /// HH:MM
    #[arg(long, default_value = "")]
    time: String,

    #[arg(long, default_value = "")]
    reason: String,
}

#[derive(Debug, Args)]
struct VisitorPassArgs {
    #[command(flatten)]
    visitor: VisitorArgs,

    /// Charge the visit to an existing booking
    #[arg(long)]
    booking_id: Option<i64>,

    #[command(flatten)]
    widget: WidgetArgs,
}

#[derive(Debug, Args)]
struct WidgetArgs {
    /// Skip checking that the checkout script is reachable
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vayuhu_api=info,vayuhu_checkout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir).context("Failed to load config")?;
    tracing::debug!("Using backend at {}", config.api.base_url);

    let sessions: Arc<dyn SessionProvider> = Arc::new(
        FileSessionStore::open(&config.session.path).context("Failed to open session store")?,
    );
    let client = Arc::new(ApiClient::new(&config.api, sessions.clone())?);

    run(cli.command, &config, client, sessions).await
}

async fn run(
    command: Commands,
    config: &AppConfig,
    client: Arc<ApiClient>,
    sessions: Arc<dyn SessionProvider>,
) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => {
            let signed_in = client.login(&args.email, &args.password).await?;
            println!("Welcome, {}", display_name(&signed_in.identity));
        }
        Commands::Signup(args) => {
            let signed_in = client
                .signup(&args.name, &args.credentials.email, &args.credentials.password)
                .await?;
            println!("Account created for {}", display_name(&signed_in.identity));
        }
        Commands::AdminLogin(args) => {
            let signed_in = client.admin_login(&args.email, &args.password).await?;
            println!("Signed in as admin {}", display_name(&signed_in.identity));
        }
        Commands::Logout => {
            client.logout()?;
            println!("Signed out");
        }
        Commands::Whoami { remote } => {
            let session = signed_in(&client)?;
            let role = if session.identity.is_admin() { "admin" } else { "user" };
            println!(
                "{} #{} <{}> ({role})",
                display_name(&session.identity),
                session.identity.id(),
                session.identity.email().unwrap_or("-")
            );
            if remote {
                let reply = client.check_protected().await?;
                println!("{}", serde_json::to_string_pretty(&reply)?);
            }
        }
        Commands::Reservations(list) => {
            let rows = client.reservations().await?;
            let stats = reports::reservation_stats(&rows, Local::now().naive_local());
            println!(
                "New: {}  Ongoing: {}  Completed: {}",
                stats.new, stats.ongoing, stats.completed
            );

            let matched: Vec<_> = match &list.search {
                Some(term) => reports::search_reservations(&rows, term)
                    .into_iter()
                    .cloned()
                    .collect(),
                None => rows,
            };
            let page = reports::page(&matched, list.page, list.per_page);
            for r in page.rows {
                println!(
                    "#{:<5} {:<20} {:<14} {:<18} {:<12} {:>10}  booked {}",
                    r.id,
                    r.name.as_deref().unwrap_or("-"),
                    r.mobile_no.as_deref().unwrap_or("-"),
                    r.space.as_deref().unwrap_or("-"),
                    r.date.as_deref().unwrap_or("-"),
                    r.final_total.map(|t| t.to_string()).unwrap_or_default(),
                    r.booked_on.as_deref().unwrap_or("-"),
                );
            }
            print_page_footer(&page);
        }
        Commands::Bookings { today } => {
            let user_id = user_id(&client)?;
            let rows = client.workspace_bookings(user_id).await?;
            let shown = if today {
                reports::todays_bookings(&rows, Local::now().date_naive())
            } else {
                rows.iter().collect()
            };
            if shown.is_empty() {
                println!("No bookings");
            }
            for b in shown {
                println!(
                    "#{:<5} {:<24} {:<10} {} to {}  {}",
                    b.booking_id,
                    b.workspace_title.as_deref().unwrap_or("-"),
                    b.plan_type.as_deref().unwrap_or("-"),
                    b.start_date.as_deref().unwrap_or("-"),
                    b.end_date.as_deref().unwrap_or("-"),
                    b.status.as_deref().unwrap_or(""),
                );
            }
        }
        Commands::Summary => {
            let user_id = user_id(&client)?;
            let summary = client.booking_summary(user_id).await?;
            let counts = summary.summary;
            println!(
                "Total: {}  Upcoming: {}  Ongoing: {}  Completed: {}",
                counts.total, counts.upcoming, counts.ongoing, counts.completed
            );
        }
        Commands::Visitors { all, list } => {
            let rows = if all {
                let rows = client.all_visitors().await?;
                println!(
                    "Visitors: {}  Unique users: {}",
                    rows.len(),
                    reports::unique_visitor_users(&rows)
                );
                rows
            } else {
                client.visitors(user_id(&client)?).await?
            };

            let matched: Vec<_> = match &list.search {
                Some(term) => reports::search_visitors(&rows, term)
                    .into_iter()
                    .cloned()
                    .collect(),
                None => rows,
            };
            let page = reports::page(&matched, list.page, list.per_page);
            for v in page.rows {
                println!(
                    "#{:<5} {:<20} {:<14} {:<18} {} {}",
                    v.id,
                    v.name.as_deref().unwrap_or("-"),
                    v.contact.as_deref().unwrap_or("-"),
                    v.company_name.as_deref().unwrap_or("-"),
                    v.visiting_date.as_deref().unwrap_or("-"),
                    v.visiting_time.as_deref().map(|t| t.get(..5).unwrap_or(t)).unwrap_or("-"),
                );
            }
            print_page_footer(&page);
        }
        Commands::Revenue => {
            let series = reports::revenue_series(&client.monthly_revenue().await?);
            for (month, total) in series.categories.iter().zip(&series.totals) {
                println!("{month:<10} {total:>12}");
            }
        }
        Commands::Blogs => {
            for post in reports::active_blogs(client.blogs().await?) {
                println!(
                    "#{:<4} {}",
                    post.id,
                    post.blog_heading.as_deref().unwrap_or("(untitled)")
                );
            }
        }
        Commands::Book(args) => {
            let mut item = CartItem::new(
                args.space_id,
                args.title,
                args.plan_type,
                args.start_date,
                args.end_date,
                args.amount,
            );
            item.coupon_code = args.coupon;
            item.seat_codes = args.seat_codes;

            let mut cart = Cart::new();
            cart.add(item)?;

            let orchestrator = orchestrator(config, client, sessions, &args.widget);
            let outcome = checkout_cart(&orchestrator, &mut cart).await?;
            report(outcome).await;
        }
        Commands::VisitorPass(args) => {
            let pass = visitor_pass(args.visitor);
            let fee = config.payment.visitor_pass_fee;
            let orchestrator = orchestrator(config, client, sessions, &args.widget);
            let outcome = match args.booking_id {
                Some(booking_id) => {
                    buy_booking_visitor_pass(&orchestrator, booking_id, pass, fee).await?
                }
                None => buy_visitor_pass(&orchestrator, pass, fee).await?,
            };
            report(outcome).await;
        }
        Commands::WalkIn(args) => {
            let visitor = AdminVisitor {
                name: args.name,
                contact: args.contact,
                email: args.email,
                company_name: args.company,
                visiting_date: args.date,
                visiting_time: args.time,
                reason: args.reason,
            };
            client.admin_add_visitor(&visitor).await?;
            println!("Visitor added successfully!");
        }
    }
    Ok(())
}

fn display_name(identity: &Identity) -> &str {
    identity.name().or(identity.email()).unwrap_or("(unnamed)")
}

fn signed_in(client: &ApiClient) -> anyhow::Result<Session> {
    client
        .session()
        .context("Not signed in. Run `vayuhu login` first.")
}

fn user_id(client: &ApiClient) -> anyhow::Result<i64> {
    match signed_in(client)?.identity.user_id() {
        Some(id) => Ok(id),
        None => bail!("This command needs a user account, not an admin session"),
    }
}

fn print_page_footer<T>(page: &reports::Page<'_, T>) {
    println!(
        "Showing {} to {} of {} entries (page {}/{})",
        page.first(),
        page.last(),
        page.total,
        page.number,
        page.total_pages
    );
}

fn visitor_pass(args: VisitorArgs) -> VisitorPass {
    VisitorPass {
        name: args.name,
        contact: args.contact,
        email: args.email,
        company_name: args.company,
        visiting_date: args.date,
        visiting_time: args.time,
        reason: args.reason,
    }
}

fn orchestrator(
    config: &AppConfig,
    client: Arc<ApiClient>,
    sessions: Arc<dyn SessionProvider>,
    widget: &WidgetArgs,
) -> CheckoutOrchestrator {
    let widget: Arc<dyn PaymentWidget> = if widget.offline {
        Arc::new(TerminalWidget::offline())
    } else {
        Arc::new(TerminalWidget::new(config.payment.script_url.clone()))
    };
    let settings = CheckoutSettings {
        currency: config.payment.currency.clone(),
        merchant_name: config.payment.merchant_name.clone(),
        theme_color: config.payment.theme_color.clone(),
    };

    let orchestrator = CheckoutOrchestrator::new(client, widget, sessions, settings);
    let mut events = orchestrator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(attempt = %event.attempt_id, state = ?event.state, "Checkout progress");
        }
    });
    orchestrator
}

async fn report(outcome: CheckoutOutcome) {
    match outcome {
        CheckoutOutcome::Completed(receipt) => {
            println!("{} (payment {})", receipt.message, receipt.payment_id);
            if let Some(notification) = receipt.notification {
                // Let the confirmation email go out before the process exits.
                let _ = notification.await;
            }
        }
        CheckoutOutcome::Cancelled { .. } => println!("Payment cancelled."),
    }
}
