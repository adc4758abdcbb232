use colored::Colorize;

use tw_core::evaluate;

pub fn run(expression: &str, karma: Option<&str>, seed: Option<u64>) -> Result<(), String> {
    let mut rng = super::make_rng(seed);
    let trace = evaluate(expression, karma, &mut rng).map_err(|e| e.to_string())?;

    println!("  {} {}", "Roll:".dimmed(), expression.trim());
    println!("  {} {}", "Details:".dimmed(), trace.details());
    println!("  {} {}", "Total:".dimmed(), trace.total.to_string().bold());

    Ok(())
}
