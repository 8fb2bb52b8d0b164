use async_trait::async_trait;
use clap::{Parser, Subcommand};
use gabarita_pay::application::flow::PaymentFlow;
use gabarita_pay::domain::payment::NavigationTarget;
use gabarita_pay::domain::ports::{Navigator, NavigatorRef, PaymentBackendBox};
use gabarita_pay::infrastructure::http::HttpPaymentBackend;
use gabarita_pay::infrastructure::in_memory::InMemoryPaymentBackend;
use gabarita_pay::interfaces::query::return_context_from_query;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_BASE_URL: &str = "https://gabarita-ai-backend.onrender.com";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the payment backend
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token sent with every backend request
    #[arg(long)]
    token: Option<String>,

    /// JSON fixture file; when set, all backend calls are served locally
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Seconds to wait before the automatic dashboard navigation
    #[arg(long, default_value_t = 3)]
    grace_delay: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile a return from the payment processor
    Reconcile {
        /// Query string from the return URL, e.g. "payment_id=1&status=approved"
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Start a checkout for a plan
    Checkout {
        #[arg(long)]
        plan: String,
        #[arg(long)]
        user: String,
    },
    /// List the plan catalog
    Plans,
}

/// Navigation surface of the CLI shell: prints where the host app would go.
struct ShellNavigator;

#[async_trait]
impl Navigator for ShellNavigator {
    async fn navigate(&self, target: NavigationTarget) {
        println!("navigating to: {target}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let backend: PaymentBackendBox = if let Some(fixture) = &cli.fixture {
        Box::new(InMemoryPaymentBackend::from_fixture_file(fixture).into_diagnostic()?)
    } else {
        let mut http = HttpPaymentBackend::new(&cli.base_url);
        if let Some(token) = &cli.token {
            http = http.with_bearer_token(token);
        }
        Box::new(http)
    };

    let navigator: NavigatorRef = Arc::new(ShellNavigator);
    let flow = PaymentFlow::new(backend, navigator)
        .with_grace_delay(Duration::from_secs(cli.grace_delay));

    match cli.command {
        Command::Reconcile { query } => {
            let context = return_context_from_query(&query);
            let result = flow.reconcile(context).await;

            println!("outcome: {}", result.outcome);
            println!("status: {}", result.status);
            println!("notice: {}", result.notice.message);
            if let Some(record) = &result.record {
                println!("payment_id: {}", record.id);
                println!("amount: {}", record.transaction_amount);
            }
            if let Some(error) = &result.error {
                println!("error: {error}");
            }
            for action in result.actions() {
                println!("action: {action}");
            }
            if let Some(navigation) = result.navigation {
                navigation.wait().await;
            }
        }
        Command::Checkout { plan, user } => {
            let catalog = flow
                .load_plans()
                .await
                .into_diagnostic()
                .wrap_err("Erro ao carregar planos")?;
            let session = flow
                .checkout(&plan, &user, &catalog)
                .await
                .into_diagnostic()
                .wrap_err("Erro ao criar pagamento")?;
            println!("payment_id: {}", session.payment_id);
            println!("redirect to: {}", session.init_point);
        }
        Command::Plans => {
            let catalog = flow.load_plans().await.into_diagnostic()?;
            for plan in catalog.plans() {
                println!("{}\t{}\tR$ {}", plan.id, plan.name, plan.price);
            }
        }
    }

    Ok(())
}
