//! Prompt construction for product suggestions.

use super::aligner::BULLET;
use crate::types::Post;

pub fn suggestion_prompt(posts: &[Post]) -> String {
    let titles = posts
        .iter()
        .map(|p| format!("- {}", p.title))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are a retail product analyst.\n\n\
         For each of the following discussion post titles, suggest **one specific retail product** \
         (food, gadget, clothing, etc.) relevant to that discussion. Keep it concise and under 15 words.\n\n\
         Respond using bullet points ({bullet}), exactly one per title, in the same order as the titles.\n\n\
         Titles:\n{titles}\n",
        bullet = BULLET,
        titles = titles,
    )
}
