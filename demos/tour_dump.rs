//! Tour dump: print the sentence cycle and every edit plan in it.
//!
//! Pass sentences as arguments, or run without arguments for a sample set.

use wordwheel::{EditAction, TokenSequence, TourBuilder};

fn describe(action: &EditAction) -> String {
    match action {
        EditAction::Keep {
            from_index,
            to_index,
            from_word,
            ..
        } => format!("  keep   {from_index:>2} -> {to_index:>2}  {:?}", from_word.text()),
        EditAction::Substitute {
            from_index,
            to_index,
            from_word,
            to_word,
        } => format!(
            "  swap   {from_index:>2} -> {to_index:>2}  {:?} -> {:?}",
            from_word.text(),
            to_word.text()
        ),
        EditAction::Remove {
            from_index,
            from_word,
        } => format!("  remove {from_index:>2}        {:?}", from_word.text()),
        EditAction::Insert { to_index, to_word } => {
            format!("  insert       {to_index:>2}  {:?}", to_word.text())
        }
    }
}

fn main() -> wordwheel::Result<()> {
    let mut sentences: Vec<String> = std::env::args().skip(1).collect();
    if sentences.is_empty() {
        sentences = vec![
            "The quick brown fox is very cool, supposedly.".to_string(),
            "The brown color is very very pretty, no?".to_string(),
            "We're here (in Wilkes-Barre), finally!".to_string(),
            "Finally, we're here.".to_string(),
        ];
    }

    let sequences = sentences
        .iter()
        .map(|sentence| wordwheel::tokenize(sentence))
        .collect::<wordwheel::Result<Vec<TokenSequence>>>()?;
    let tour = TourBuilder::new().build(&sequences);

    println!("Tour order: {:?}", tour.order());
    println!("Total cost: {}", tour.total_cost());
    println!();

    for leg in tour.legs() {
        println!(
            "[{}] {:?} -> [{}] {:?}  (cost {})",
            leg.source,
            sentences[leg.source],
            leg.target,
            sentences[leg.target],
            leg.plan.cost()
        );
        for action in leg.plan.actions() {
            println!("{}", describe(action));
        }
        println!();
    }
    Ok(())
}
