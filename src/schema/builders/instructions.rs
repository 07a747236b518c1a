//! Step-by-step content: how-tos, recipes and FAQs.

use crate::schema::doc::{Doc, aggregate_rating, duration_field, image, people, steps};
use crate::value::{Fields, as_text};
use serde_json::Value;

/// `HowToSupply` / `HowToTool` nodes from strings or `{ name }` records.
fn named_items(items: &[Value], kind: &str) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| as_text(item).or_else(|| Fields::new(item).text("name")))
        .map(|name| Doc::node(kind).text("name", Some(name)).build())
        .collect()
}

pub fn how_to(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;
    let steps = steps(f.list("steps"), "HowToStep");
    if steps.is_empty() {
        return None;
    }
    let cost = f.text("estimatedCost").map(|value| {
        Doc::node("MonetaryAmount")
            .text("currency", f.text("currency"))
            .text("value", Some(value))
            .build()
    });
    Some(
        Doc::new("HowTo")
            .text("name", Some(name))
            .text("description", f.text("description"))
            .value("image", image(&f, "image"))
            .text("totalTime", duration_field(&f, "totalTime"))
            .value("estimatedCost", cost)
            .list("supply", named_items(f.list("supplies"), "HowToSupply"))
            .list("tool", named_items(f.list("tools"), "HowToTool"))
            .list("step", steps)
            .build(),
    )
}

pub fn recipe(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let name = f.text("name")?;

    // instructions may be a list or a newline-separated block of text
    let instructions = match f.get("instructions") {
        Some(Value::Array(items)) => steps(items, "HowToStep"),
        _ => f
            .lines("instructions")
            .into_iter()
            .map(|text| Doc::node("HowToStep").text("text", Some(text)).build())
            .collect(),
    };
    let calories = f.text("calories").map(|calories| {
        Doc::node("NutritionInformation")
            .text("calories", Some(calories))
            .build()
    });

    Some(
        Doc::new("Recipe")
            .text("name", Some(name))
            .text("description", f.text("description"))
            .value("image", image(&f, "image"))
            .one_or_many("author", people(&f, "author"))
            .text("datePublished", f.text("datePublished"))
            .text("prepTime", duration_field(&f, "prepTime"))
            .text("cookTime", duration_field(&f, "cookTime"))
            .text("totalTime", duration_field(&f, "totalTime"))
            .text("recipeYield", f.text("recipeYield"))
            .text("recipeCategory", f.text("recipeCategory"))
            .text("recipeCuisine", f.text("recipeCuisine"))
            .strings("keywords", f.strings("keywords"))
            .strings("recipeIngredient", f.lines("ingredients"))
            .list("recipeInstructions", instructions)
            .value("nutrition", calories)
            .value("aggregateRating", aggregate_rating(&f.record("rating")))
            .build(),
    )
}

/// `FAQPage` from `questions: [{ question, answer }]`. Pairs missing either
/// side are skipped; at least one complete pair is required.
pub fn faq_page(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let questions: Vec<_> = f
        .list("questions")
        .iter()
        .filter_map(|item| {
            let item = Fields::new(item);
            let question = item.text("question")?;
            let answer = item.text("answer")?;
            Some(
                Doc::node("Question")
                    .text("name", Some(question))
                    .value(
                        "acceptedAnswer",
                        Some(Doc::node("Answer").text("text", Some(answer)).build()),
                    )
                    .build(),
            )
        })
        .collect();
    if questions.is_empty() {
        return None;
    }
    Some(Doc::new("FAQPage").list("mainEntity", questions).build())
}
