use spelling_rt::protocol::models::{Item, Response, ResponseStatus, Session};
use spelling_rt::{
    ClientEvent, Outbound, PanelConfig, ServerEvent, SessionPhase, SpellingPanel, View,
    DISPLAY_SPELLED_WORD,
};

fn created() -> ServerEvent {
    ServerEvent::SessionCreated { event_id: "evt_0".to_string(), session: Session::default() }
}

fn done(calls: &[(&str, &str)]) -> ServerEvent {
    let output = calls
        .iter()
        .enumerate()
        .map(|(i, (name, arguments))| Item::FunctionCall {
            id: None,
            status: None,
            name: (*name).to_string(),
            call_id: format!("call_{i}"),
            arguments: (*arguments).to_string(),
        })
        .collect();
    ServerEvent::ResponseDone {
        event_id: "evt_done".to_string(),
        response: Response {
            id: "resp".to_string(),
            object: None,
            status: ResponseStatus::Completed,
            status_details: None,
            output: Some(output),
            metadata: None,
            usage: None,
        },
    }
}

fn registrations(outbound: &[Outbound]) -> usize {
    outbound
        .iter()
        .filter(|o| matches!(o, Outbound::Send(ClientEvent::SessionUpdate { .. })))
        .count()
}

fn live_panel() -> (SpellingPanel, Vec<ServerEvent>) {
    let mut panel = SpellingPanel::new(PanelConfig::default()).unwrap();
    panel.set_session_active(true);
    let log = vec![created()];
    let out = panel.on_events(&log).unwrap();
    assert_eq!(registrations(&out), 1);
    (panel, log)
}

#[test]
fn repeated_notifications_never_reregister() {
    let (mut panel, mut log) = live_panel();
    let mut total = 0;
    for _ in 0..5 {
        total += registrations(&panel.on_events(&log).unwrap());
    }
    log.insert(0, done(&[]));
    total += registrations(&panel.on_events(&log).unwrap());
    assert_eq!(total, 0);
    assert_eq!(panel.phase(), SessionPhase::AwaitingUtterance);
}

#[test]
fn practice_record_grows_once_per_call_in_order() {
    let (mut panel, mut log) = live_panel();
    let words = ["cat", "dog", "bird", "fish"];
    for word in words {
        let args = format!(r#"{{"word":"{word}","correctWord":"{word}"}}"#);
        log.insert(0, done(&[(DISPLAY_SPELLED_WORD, args.as_str())]));
        panel.on_events(&log).unwrap();
    }
    assert_eq!(panel.practice_record().words(), words.map(String::from));
}

#[test]
fn last_call_in_a_response_is_displayed() {
    let (mut panel, mut log) = live_panel();
    log.insert(
        0,
        done(&[
            (DISPLAY_SPELLED_WORD, r#"{"word":"Cat","correctWord":"cat"}"#),
            (DISPLAY_SPELLED_WORD, r#"{"word":"kat ","correctWord":"cat"}"#),
        ]),
    );
    let out = panel.on_events(&log).unwrap();
    assert_eq!(
        out.iter().filter(|o| matches!(o, Outbound::SendAfter { .. })).count(),
        2
    );
    match panel.view() {
        View::Output { word, is_correct, correct_word, .. } => {
            assert_eq!(word, "kat ");
            assert!(!is_correct);
            assert_eq!(correct_word, "cat");
        }
        other => panic!("unexpected view: {other:?}"),
    }
    assert_eq!(panel.practice_record().len(), 2);
}

#[test]
fn toggling_never_changes_the_record() {
    let (mut panel, mut log) = live_panel();
    log.insert(0, done(&[(DISPLAY_SPELLED_WORD, r#"{"word":"sun","correctWord":"sun"}"#)]));
    panel.on_events(&log).unwrap();
    panel.set_session_active(false);

    let before = panel.practice_record().clone();
    for _ in 0..3 {
        panel.toggle_show_all();
        assert_eq!(panel.practice_record(), &before);
    }
    assert!(panel.state().show_all_words);
}

#[test]
fn session_end_resets_only_registration_and_output() {
    let (mut panel, mut log) = live_panel();
    log.insert(0, done(&[(DISPLAY_SPELLED_WORD, r#"{"word":"moon","correctWord":"moon"}"#)]));
    panel.on_events(&log).unwrap();
    assert_eq!(panel.phase(), SessionPhase::OutputReady);

    let out = panel.set_session_active(false);
    assert_eq!(out, vec![Outbound::CancelPending]);
    let state = panel.state();
    assert!(!state.tool_registered);
    assert!(state.last_output.is_none());
    assert_eq!(state.practice_record.words(), ["moon".to_string()]);
    assert_eq!(panel.phase(), SessionPhase::Idle);
}
