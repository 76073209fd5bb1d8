use std::path::PathBuf;

use indexwatch_core::{
    update, AppState, CheckOutcome, Effect, Msg, UploadCandidate, UrlRecord, MESSAGE_LIFETIME,
};

fn one_url() -> Vec<UrlRecord> {
    vec![UrlRecord {
        url: "https://example.com".to_string(),
        status: "Indexed".to_string(),
        last_checked: "today".to_string(),
        notes: None,
    }]
}

fn csv() -> UploadCandidate {
    UploadCandidate {
        path: PathBuf::from("urls.csv"),
        file_name: "urls.csv".to_string(),
        size_bytes: 64,
    }
}

fn upload_outcome(urls: Vec<UrlRecord>) -> Msg {
    Msg::UploadFinished(Ok(indexwatch_core::UploadOutcome {
        urls,
        message: "ok".to_string(),
    }))
}

fn message_timer(effects: &[Effect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        Effect::ScheduleMessageClear { message_id, after } => {
            assert_eq!(*after, MESSAGE_LIFETIME);
            Some(*message_id)
        }
        _ => None,
    })
}

#[test]
fn check_is_disabled_with_zero_urls() {
    let (state, _) = update(AppState::new(), Msg::UrlsFetched(Ok(Vec::new())));
    assert!(!state.view().check_enabled);

    let before = state.clone();
    let (next, effects) = update(state, Msg::CheckClicked);
    assert!(effects.is_empty());
    assert_eq!(next, before);
}

#[test]
fn second_check_while_checking_is_ignored() {
    let (state, _) = update(AppState::new(), Msg::UrlsFetched(Ok(one_url())));
    let (state, _) = update(state, Msg::CheckClicked);
    let (state, effects) = update(state, Msg::CheckClicked);

    assert!(effects.is_empty());
    assert!(state.view().checking);
}

#[test]
fn uploads_and_checks_are_serialized() {
    let (state, _) = update(AppState::new(), Msg::UrlsFetched(Ok(one_url())));
    let (state, _) = update(state, Msg::UploadChosen(csv()));
    assert!(!state.view().check_enabled);
    let (state, effects) = update(state, Msg::CheckClicked);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::UploadChosen(csv()));
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::UploadPromptOpened);
    assert!(state.view().upload_prompt.is_none());

    let (state, _) = update(state, upload_outcome(one_url()));
    let (state, _) = update(state, Msg::CheckClicked);
    assert!(!state.view().upload_enabled);
    let (_state, effects) = update(state, Msg::UploadChosen(csv()));
    assert!(effects.is_empty());
}

#[test]
fn message_expires_after_its_own_timer() {
    let (state, effects) = update(AppState::new(), Msg::DownloadClicked);
    let first = message_timer(&effects).expect("timer");

    let (state, _) = update(state, Msg::MessageExpired { message_id: first });
    assert!(state.view().message.is_none());
}

#[test]
fn newer_message_survives_older_timer() {
    let (state, effects) = update(AppState::new(), Msg::DownloadClicked);
    let first = message_timer(&effects).expect("first timer");

    let (state, effects) = update(
        state,
        Msg::DownloadFinished(Ok(PathBuf::from("report.csv"))),
    );
    let second = message_timer(&effects).expect("second timer");
    assert_ne!(first, second);

    let (mut state, _) = update(state, Msg::MessageExpired { message_id: first });
    assert_eq!(
        state.view().message.map(|m| m.id),
        Some(second),
        "older timer must not clear the newer message"
    );
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::MessageExpired { message_id: second });
    assert!(state.view().message.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn finishing_check_always_clears_flag() {
    let (state, _) = update(AppState::new(), Msg::UrlsFetched(Ok(one_url())));
    let (state, _) = update(state, Msg::CheckClicked);
    let (state, _) = update(
        state,
        Msg::CheckFinished(Ok(CheckOutcome {
            urls: Vec::new(),
            timestamp: "now".to_string(),
        })),
    );
    assert!(!state.view().checking);
    // Server returned no rows, so the guard re-engages.
    assert!(!state.view().check_enabled);
}

#[test]
fn upload_waits_for_initial_list() {
    let (state, _) = update(AppState::new(), Msg::Mounted);
    assert!(!state.view().upload_enabled);

    let (state, _) = update(state, Msg::UploadPromptOpened);
    assert!(state.view().upload_prompt.is_none());

    let before = state.clone();
    let (state, effects) = update(state, Msg::UploadChosen(csv()));
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, _) = update(state, Msg::UrlsFetched(Ok(one_url())));
    assert!(state.view().upload_enabled);
}

#[test]
fn uploaded_list_is_what_renders() {
    let uploaded: Vec<UrlRecord> = ["https://a.example", "https://b.example", "https://c.example"]
        .into_iter()
        .map(|url| UrlRecord {
            url: url.to_string(),
            status: "Pending".to_string(),
            last_checked: "Never".to_string(),
            notes: None,
        })
        .collect();

    let (state, _) = update(AppState::new(), Msg::Mounted);
    let (state, _) = update(state, Msg::UrlsFetched(Ok(one_url())));
    let (state, effects) = update(state, Msg::UploadChosen(csv()));
    assert_eq!(
        effects,
        vec![Effect::UploadCsv {
            path: PathBuf::from("urls.csv")
        }]
    );

    let (state, _) = update(state, upload_outcome(uploaded.clone()));
    let view = state.view();
    assert_eq!(view.table.row_count(), uploaded.len());
    assert_eq!(view.footer, "Monitoring 3 URLs");
}
