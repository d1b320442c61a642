use crate::output::print_json;
use anyhow::Context;
use tutorbook_core::{
    lesson::{self, AddOn, LessonKind},
    pricing::strategy_by_name,
};

#[allow(clippy::too_many_arguments)]
pub fn run(
    lesson: &str,
    count: u32,
    strategy: &str,
    add_ons: &[String],
    referrals: u32,
    discount: f64,
    json: bool,
) -> anyhow::Result<()> {
    let kind: LessonKind = lesson.parse().context("unrecognized lesson")?;
    let add_ons: Vec<AddOn> = add_ons
        .iter()
        .map(|s| s.parse())
        .collect::<Result<_, _>>()
        .context("unrecognized add-on")?;

    let pricing = strategy_by_name(strategy, referrals, discount)?;
    let per_lesson = lesson::price_with_addons(kind, &add_ons);
    let total = pricing.price(per_lesson, count);

    if json {
        #[derive(serde::Serialize)]
        struct PriceOutput {
            lesson: LessonKind,
            add_ons: Vec<AddOn>,
            count: u32,
            strategy: &'static str,
            per_lesson: f64,
            total: f64,
        }
        return print_json(&PriceOutput {
            lesson: kind,
            add_ons,
            count,
            strategy: pricing.name(),
            per_lesson,
            total,
        });
    }

    println!(
        "{} x {} at {:.2} each",
        count,
        lesson::describe_with_addons(kind, &add_ons),
        per_lesson
    );
    println!("strategy: {} ({})", pricing.name(), pricing.describe());
    println!("total: {total:.2}");
    Ok(())
}
