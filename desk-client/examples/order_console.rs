// desk-client/examples/order_console.rs
// Sign in and list the status actions available on each order
//
// Usage: SALESDESK_API_URL=http://localhost:8000 \
//        cargo run -p desk-client --example order_console -- manager@example.com

use std::sync::Arc;

use anyhow::Context;
use desk_client::{ClientConfig, init_logger};
use desk_core::orders::status_label;
use desk_core::{Guard, NoticeBus, OrderBook, OrderDesk, SessionHandle, SessionManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = ClientConfig::from_env()?;
    let email = std::env::args()
        .nth(1)
        .or_else(|| config.user_email.clone())
        .context("pass a user email or set SALESDESK_USER_EMAIL")?;
    let client = Arc::new(config.with_user_email(&email).build_http_client()?);

    let notices = NoticeBus::default();
    let mut rx = notices.subscribe();
    tokio::spawn(async move {
        while let Ok(notice) = rx.recv().await {
            tracing::info!(level = ?notice.level, "{}", notice.message);
        }
    });

    let session = SessionHandle::new();
    let manager = SessionManager::new(client.clone(), session.clone());
    let principal = manager.login(&email).await?;
    println!("{} ({})", principal.email, principal.role);
    for key in &principal.permissions {
        println!("  - {key}");
    }

    let mut book = OrderBook::new(client, notices.clone());
    book.load().await?;
    let desk = OrderDesk::new(Guard::new(session, notices), book);

    for order in desk.book().orders() {
        let actions: Vec<&str> = desk
            .actions_for(order.sale_id)
            .iter()
            .map(|a| a.label())
            .collect();
        println!(
            "#{} {} [{}] {}",
            order.sale_id,
            order.customer_name.as_deref().unwrap_or("-"),
            status_label(order.order_status),
            actions.join(", ")
        );
    }

    manager.logout();
    Ok(())
}
