use mutuals_core::{
    ActionFailure, ActionKind, ActionState, AppViewModel, Counts, DerivedSets, EntryRowView,
    ListKind, LoadState, RelationEntry,
};

const PRIVATE_PROFILE_NOTE: &str =
    "Note: this list may include private or deleted profiles that cannot be followed.";

pub fn counts_line(counts: Counts) -> String {
    format!(
        "Followers: {} | Following: {} | Not following you back: {} | You don't follow back: {}",
        counts.followers, counts.following, counts.not_following_back, counts.not_following
    )
}

pub fn list_title(list: ListKind, len: usize) -> String {
    match list {
        ListKind::NotFollowingBack => format!("You follow them, they don't follow you back ({len}):"),
        ListKind::NotFollowing => format!("They follow you, you don't follow them back ({len}):"),
    }
}

pub fn empty_list_message(list: ListKind) -> &'static str {
    match list {
        ListKind::NotFollowingBack => "Everyone you follow follows you back!",
        ListKind::NotFollowing => "You follow everyone who follows you!",
    }
}

pub fn snapshot_lines(counts: Counts, derived: &DerivedSets, checked_at: &str) -> Vec<String> {
    let mut lines = vec![format!("Checked at {checked_at}"), counts_line(counts)];
    for list in [ListKind::NotFollowingBack, ListKind::NotFollowing] {
        let entries = derived.list(list);
        lines.push(String::new());
        lines.push(list_title(list, entries.len()));
        if entries.is_empty() {
            lines.push(format!("  {}", empty_list_message(list)));
            continue;
        }
        if list == ListKind::NotFollowing {
            lines.push(format!("  {PRIVATE_PROFILE_NOTE}"));
        }
        lines.extend(entries.iter().map(entry_line));
    }
    lines
}

fn entry_line(entry: &RelationEntry) -> String {
    format!("  - {:<24} {}", entry.display_name, entry.profile_url)
}

/// Full listing for the `list` command, including per-item action status.
pub fn view_lines(view: &AppViewModel) -> Vec<String> {
    match view.load {
        LoadState::Empty => {
            return vec![view
                .last_error
                .as_ref()
                .map(|err| format!("Error: {err}"))
                .unwrap_or_else(|| "Nothing checked yet. Use `check <user>`.".to_string())];
        }
        LoadState::Loading => return vec!["Check in progress...".to_string()],
        LoadState::Loaded => {}
    }

    let mut lines = Vec::new();
    if let Some(identity) = &view.identity {
        lines.push(format!("Results for {identity}"));
    }
    lines.push(counts_line(view.counts));
    for (list, rows) in [
        (ListKind::NotFollowingBack, &view.not_following_back),
        (ListKind::NotFollowing, &view.not_following),
    ] {
        lines.push(String::new());
        lines.push(list_title(list, rows.len()));
        if rows.is_empty() {
            lines.push(format!("  {}", empty_list_message(list)));
            continue;
        }
        lines.extend(
            rows.iter()
                .map(|row| row_line(row, view.actions_available)),
        );
    }
    if view.pending_actions > 0 {
        lines.push(String::new());
        lines.push(format!("{} action(s) in progress", view.pending_actions));
    }
    lines
}

fn row_line(row: &EntryRowView, actions_available: bool) -> String {
    format!(
        "  - {:<24} {:<40} [{}]",
        row.display_name,
        row.profile_url,
        state_label(&row.state, row.action, actions_available)
    )
}

pub fn state_label(state: &ActionState, action: ActionKind, actions_available: bool) -> String {
    match state {
        ActionState::Idle if !actions_available => "token required".to_string(),
        ActionState::Idle => format!("{action} {}", action_hint(action)),
        ActionState::Pending => "processing...".to_string(),
        ActionState::Succeeded => done_label(action).to_string(),
        ActionState::Failed(ActionFailure::PrivateOrDeleted) => "private/deleted profile".to_string(),
        ActionState::Failed(reason) => format!("error: {reason}"),
    }
}

fn action_hint(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Follow => "back",
        ActionKind::Unfollow => "available",
    }
}

pub fn done_label(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Follow => "following",
        ActionKind::Unfollow => "unfollowed",
    }
}
