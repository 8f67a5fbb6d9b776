use clap::{Parser, Subcommand};
use reqwest::RequestBuilder;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "customer-cli")]
#[command(about = "Management CLI for the customer REST API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Admin username (Basic auth, admin commands only).
    #[arg(long, env = "ADMIN_NAME", default_value = "")]
    user: String,

    /// Admin password (Basic auth, admin commands only).
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all customers
    Customers,
    /// Show one customer
    Customer { id: String },
    /// Create a customer
    CreateCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: i64,
    },
    /// List a customer's orders
    Orders { customer: String },
    /// Show one order
    Order { customer: String, order: String },
    /// Create an order for a customer
    CreateOrder {
        customer: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        amount: i64,
    },
    /// Admin greeting (checks credentials)
    Admin,
    /// Admin status with store counts
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Customers => client.get(format!("{base}/customers")),
        Commands::Customer { id } => client.get(format!("{base}/customers/{id}")),
        Commands::CreateCustomer { name, age } => client
            .post(format!("{base}/customers"))
            .json(&json!({ "name": name, "age": age })),
        Commands::Orders { customer } => client.get(format!("{base}/customers/{customer}/orders")),
        Commands::Order { customer, order } => {
            client.get(format!("{base}/customers/{customer}/orders/{order}"))
        }
        Commands::CreateOrder {
            customer,
            product,
            price,
            amount,
        } => client
            .post(format!("{base}/customers/{customer}/orders"))
            .json(&json!({ "product": product, "price": price, "amount": amount })),
        Commands::Admin => admin(client.get(format!("{base}/admin")), &cli),
        Commands::Status => admin(client.get(format!("{base}/admin/status")), &cli),
    };

    print_response(request.send().await?).await
}

fn admin(request: RequestBuilder, cli: &Cli) -> RequestBuilder {
    request.basic_auth(&cli.user, Some(&cli.password))
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if let Some(location) = res.headers().get(reqwest::header::LOCATION) {
        eprintln!("Location: {}", location.to_str().unwrap_or_default());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
