use crate::{CrawlPhase, CrawlState, Effect, Msg, StopReason};

/// Pure update function: applies a message to the crawl state and returns any effects.
///
/// Messages that do not fit the current phase are ignored.
pub fn update(mut state: CrawlState, msg: Msg) -> (CrawlState, Vec<Effect>) {
    let effects = match msg {
        Msg::Start => {
            if *state.phase() != CrawlPhase::Idle {
                return (state, Vec::new());
            }
            state.begin_page(1);
            vec![Effect::FetchPage {
                page: 1,
                cursor: None,
            }]
        }
        Msg::PageLoaded { entries, issues } => {
            if *state.phase() != CrawlPhase::Fetching {
                return (state, Vec::new());
            }
            state.record_page(entries.len(), issues);
            state.accept_page(&entries);

            // Pages are newest-first, so the last entry is both the cursor and the oldest.
            let reason = match entries.last() {
                None => Some(StopReason::EmptyPage),
                Some(last) => {
                    state.set_cursor(last.id.clone());
                    if last.timestamp <= state.watermark() {
                        Some(StopReason::CaughtUp)
                    } else if state.page() >= state.max_pages() {
                        Some(StopReason::PageCeiling {
                            max_pages: state.max_pages(),
                        })
                    } else {
                        None
                    }
                }
            };

            match reason {
                Some(reason) => stop(&mut state, reason),
                None => {
                    state.set_phase(CrawlPhase::Continue);
                    vec![Effect::Pause]
                }
            }
        }
        Msg::PageFailed { message } => {
            if *state.phase() != CrawlPhase::Fetching {
                return (state, Vec::new());
            }
            let page = state.page();
            stop(&mut state, StopReason::FetchFailed { page, message })
        }
        Msg::PauseElapsed => {
            if *state.phase() != CrawlPhase::Continue {
                return (state, Vec::new());
            }
            let page = state.page() + 1;
            state.begin_page(page);
            vec![Effect::FetchPage {
                page,
                cursor: state.cursor().map(ToOwned::to_owned),
            }]
        }
    };

    (state, effects)
}

fn stop(state: &mut CrawlState, reason: StopReason) -> Vec<Effect> {
    state.set_phase(CrawlPhase::Stopped(reason.clone()));
    vec![Effect::Finish { reason }]
}
