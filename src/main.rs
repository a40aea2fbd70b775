use apr_portal::cli;
use apr_portal::config::database::init_db_pool;
use apr_portal::logging::init_tracing;
use apr_portal::modules::users::pg::PgAccountStore;
use apr_portal::router::init_router;
use apr_portal::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Console commands run without the server.
    match args.get(1).map(String::as_str) {
        Some("create-admin") => {
            handle_create_admin(args).await;
            return;
        }
        Some("unlock-account") => {
            handle_unlock_account(args).await;
            return;
        }
        _ => {}
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind listener");
    println!("🚀 Portal running on http://localhost:{port}");
    axum::serve(listener, app).await.expect("Server error");
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <username> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let accounts = PgAccountStore::new(init_db_pool().await);

    match cli::create_admin(&accounts, &args[2], &args[3], &args[4]).await {
        Ok(()) => {
            println!("✅ Administrator created successfully!");
            println!("   Username: {}", args[2]);
            println!("   Email: {}", args[3]);
        }
        Err(e) => {
            eprintln!("❌ Error creating administrator: {e}");
            std::process::exit(1);
        }
    }
}

async fn handle_unlock_account(args: Vec<String>) {
    if args.len() != 3 {
        eprintln!("Usage: {} unlock-account <username>", args[0]);
        std::process::exit(1);
    }

    let accounts = PgAccountStore::new(init_db_pool().await);

    match cli::unlock_account(&accounts, &args[2]).await {
        Ok(()) => println!("✅ Account {} unlocked", args[2]),
        Err(e) => {
            eprintln!("❌ Error unlocking account: {e}");
            std::process::exit(1);
        }
    }
}
