use indoc::formatdoc;
use itertools::Itertools;
use planchat_shared::{Conversation, FileUpload, ProjectPlan};

/// Plain-text rendering of a conversation. Tasks are prefixed with their
/// `time_block.task` position, which is what `planchat task` takes.
pub fn conversation(conversation: &Conversation) -> String {
    let plan = conversation
        .project_plan
        .as_ref()
        .map(project_plan)
        .unwrap_or_default();

    formatdoc!(
        "
        [{id}] {timestamp}
        > {user}

        {bot}
        {plan}",
        id = conversation.id,
        timestamp = conversation.timestamp,
        user = conversation.user_message,
        bot = conversation.bot_response,
    )
}

pub fn project_plan(plan: &ProjectPlan) -> String {
    let timeline = plan
        .timeline
        .iter()
        .enumerate()
        .map(|(block_index, block)| {
            let tasks = block
                .tasks
                .iter()
                .enumerate()
                .map(|(task_index, task)| {
                    let check = if task.completed { "x" } else { " " };
                    let essential = if task.essential { ", essential" } else { "" };
                    format!(
                        "  [{check}] {block_index}.{task_index} {} ({}{essential})",
                        task.task, task.estimated_time
                    )
                })
                .join("\n");

            format!("{}\n{tasks}", block.time_block)
        })
        .join("\n");

    let tips = plan.tips.iter().map(|tip| format!("- {tip}")).join("\n");

    formatdoc!(
        "

        Overview: {overview}
        Tech stack: {stack}

        {timeline}

        Tips:
        {tips}
        ",
        overview = plan.project_overview,
        stack = plan.tech_stack.iter().join(", "),
    )
}

pub fn conversation_list(conversations: &[Conversation]) -> String {
    if conversations.is_empty() {
        return "No conversations yet.".to_string();
    }

    conversations.iter().map(conversation).join("\n---\n")
}

pub fn file_upload(file: &FileUpload) -> String {
    format!(
        "{} ({:?}, {} bytes) -> {} [{}]",
        file.filename, file.file_type, file.size, file.path, file.id
    )
}

#[cfg(test)]
mod tests {
    use planchat_shared::{Task, TimeBlock};

    use super::*;

    fn plan() -> ProjectPlan {
        ProjectPlan {
            project_overview: "A habit tracker".to_string(),
            tech_stack: vec!["Rust".to_string(), "SQLite".to_string()],
            timeline: vec![TimeBlock {
                time_block: "Day 1".to_string(),
                tasks: vec![
                    Task {
                        task: "Model habits".to_string(),
                        essential: true,
                        estimated_time: "2h".to_string(),
                        completed: true,
                    },
                    Task {
                        task: "Add charts".to_string(),
                        essential: false,
                        estimated_time: "3h".to_string(),
                        completed: false,
                    },
                ],
            }],
            tips: vec!["Keep scope small".to_string()],
        }
    }

    #[test]
    fn renders_tasks_with_positions() {
        let rendered = project_plan(&plan());

        assert!(rendered.contains("Tech stack: Rust, SQLite"));
        assert!(rendered.contains("  [x] 0.0 Model habits (2h, essential)"));
        assert!(rendered.contains("  [ ] 0.1 Add charts (3h)"));
        assert!(rendered.contains("- Keep scope small"));
    }

    #[test]
    fn renders_conversation_without_plan() {
        let rendered = conversation(&Conversation {
            id: "c-1".to_string(),
            user_message: "hello".to_string(),
            bot_response: "hi there".to_string(),
            project_plan: None,
            timestamp: "2024-05-01T10:00:00".to_string(),
        });

        assert!(rendered.starts_with("[c-1] 2024-05-01T10:00:00"));
        assert!(rendered.contains("> hello"));
        assert!(rendered.contains("hi there"));
        assert!(!rendered.contains("Overview"));
    }

    #[test]
    fn empty_list_has_a_message() {
        assert_eq!(conversation_list(&[]), "No conversations yet.");
    }
}
