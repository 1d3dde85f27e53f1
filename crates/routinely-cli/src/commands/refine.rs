//! AI refinement CLI command. One attempt, no retry; a failure is reported
//! and nothing is written anywhere.

use routinely_core::{Config, HttpRefiner, Refiner};

pub fn run(text: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let refiner = HttpRefiner::new(&config.refine);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let refinement = runtime.block_on(refiner.refine(text))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&refinement)?);
    } else {
        println!("{}", refinement.refined_text);
        if refinement.is_distinct {
            println!("(instructions judged distinct and easier to follow)");
        } else {
            println!("(instructions not judged more distinct than the original)");
        }
    }
    Ok(())
}
