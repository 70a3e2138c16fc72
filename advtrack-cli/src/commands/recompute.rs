use advtrack_core::{AdvancementStore, Category, Recomputation};
use anyhow::Result;

use super::open_store;
use crate::config::AdvtrackConfig;

pub async fn run(config: &AdvtrackConfig) -> Result<()> {
    let store = open_store(&config.database).await?;
    let result = store.recompute().await?;
    print!("{}", summary(&result));
    Ok(())
}

pub(super) fn summary(result: &Recomputation) -> String {
    let mut out = format!("World: {:.2}%\n", result.percentages.world);
    for category in Category::ALL {
        out.push_str(&format!(
            "  {:<12} {:.2}%\n",
            category.name(),
            result.percentages.category(category)
        ));
    }
    let locked = result.availability.iter().filter(|(_, a)| !a).count();
    out.push_str(&format!(
        "{} advancement(s), {} locked\n",
        result.availability.len(),
        locked
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use advtrack_core::{AdvancementState, calculator};

    #[test]
    fn test_summary_counts_locked() {
        let rows = [
            AdvancementState {
                id: 1,
                tab_id: 1,
                is_completed: true,
                parent_id: None,
            },
            AdvancementState {
                id: 2,
                tab_id: 1,
                is_completed: false,
                parent_id: Some(3),
            },
        ];

        let text = summary(&calculator::recompute(&rows));

        assert!(text.contains("Minecraft"));
        assert!(text.contains("6.25%"));
        assert!(text.ends_with("2 advancement(s), 1 locked\n"));
    }
}
