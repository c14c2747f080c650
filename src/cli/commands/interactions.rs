use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_interactions(config: Config, drugs: &[String]) -> anyhow::Result<()> {
    println!("Checking: {}", drugs.join(", "));

    let state = SharedState::new(config).await?;
    let result = state.interactions.check(drugs).await?;

    println!();
    println!(
        "{} - severity {}",
        if result.safe { "Safe" } else { "NOT SAFE" },
        result.severity
    );
    println!("{:-<60}", "");
    println!("{}", result.summary);

    if !result.details.is_empty() {
        println!();
        for detail in &result.details {
            println!("  • {detail}");
        }
    }

    Ok(())
}
