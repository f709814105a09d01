use alfred_core::{Feedback, Item, ItemIcon, ItemModifier};

use crate::engine::{ProjectFinder, RankedProject};
use crate::launch::LaunchCommand;

const NO_PROJECTS_TITLE: &str = "No recent projects found";
const NO_PROJECTS_SUBTITLE: &str = "No installed IDE has a matching project on disk";
const REVEAL_SUBTITLE: &str = "Reveal project folder";

pub fn build_script_filter_feedback(query: &str, finder: &ProjectFinder) -> Feedback {
    build_feedback(&finder.search(query))
}

pub fn build_feedback(results: &[RankedProject]) -> Feedback {
    if results.is_empty() {
        return no_projects_feedback();
    }

    Feedback::new(results.iter().map(project_item).collect())
}

fn project_item(result: &RankedProject) -> Item {
    let path = result.project.path.to_string_lossy().to_string();
    let binary = result.app.binary.to_string_lossy().to_string();
    let command = LaunchCommand::for_result(result).to_shell();

    Item::new(&result.project.name)
        .with_uid(format!("{}:{path}", result.app.name()))
        .with_subtitle(path.clone())
        .with_arg(command)
        .with_autocomplete(result.project.name.clone())
        .with_icon(ItemIcon::new(result.app.descriptor.icon))
        .with_mod(
            "cmd",
            ItemModifier::new()
                .with_arg(path.clone())
                .with_subtitle(REVEAL_SUBTITLE)
                .with_valid(true),
        )
        .with_variable("ide_app", result.app.name())
        .with_variable("ide_binary", binary)
        .with_variable("project_path", path)
}

pub fn no_projects_feedback() -> Feedback {
    Feedback::new(vec![
        Item::new(NO_PROJECTS_TITLE)
            .with_subtitle(NO_PROJECTS_SUBTITLE)
            .with_valid(false),
    ])
}

pub fn is_no_projects_feedback(payload: &Feedback) -> bool {
    payload
        .items
        .first()
        .map(|item| item.title == NO_PROJECTS_TITLE && item.valid == Some(false))
        .unwrap_or(false)
}
