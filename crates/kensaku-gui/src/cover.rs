//! Cover art for the record on screen. Held in memory only.

use iced::widget::image;

use kensaku_core::RequestId;

#[derive(Debug, Clone)]
pub enum CoverState {
    Loading,
    Loaded(image::Handle),
    /// No URL, a URL outside the allow-list, or a failed download.
    Unavailable,
}

/// Cover for the displayed record, tagged with the request that produced it
/// so a late download for an older record is ignored.
#[derive(Debug, Default)]
pub struct Cover {
    current: Option<(RequestId, CoverState)>,
}

impl Cover {
    pub fn begin(&mut self, request: RequestId, state: CoverState) {
        self.current = Some((request, state));
    }

    /// Store a finished download. Returns false if `request` is no longer shown.
    pub fn finish(&mut self, request: RequestId, result: Result<image::Handle, String>) -> bool {
        match &mut self.current {
            Some((current, state)) if *current == request => {
                *state = match result {
                    Ok(handle) => CoverState::Loaded(handle),
                    Err(e) => {
                        tracing::debug!(error = %e, "cover download failed");
                        CoverState::Unavailable
                    }
                };
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> Option<&CoverState> {
        self.current.as_ref().map(|(_, state)| state)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Download an image into memory.
pub async fn fetch_cover(http: reqwest::Client, url: String) -> Result<image::Handle, String> {
    let bytes = http
        .get(&url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;
    Ok(image::Handle::from_bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use kensaku_api::MediaKind;
    use kensaku_core::{Command, Event, LookupSettings, LookupState};

    /// Real request ids only come out of the state machine.
    fn two_requests() -> (RequestId, RequestId) {
        let mut state = LookupState::new(MediaKind::Anime, LookupSettings::default());
        let mut issue = |query: &str| {
            let Command::Schedule { token, query, .. } =
                state.apply(Event::InputChanged(query.into()))
            else {
                panic!("expected Schedule");
            };
            let Command::Fetch { request, .. } = state.apply(Event::TimerFired { token, query })
            else {
                panic!("expected Fetch");
            };
            request
        };
        (issue("1"), issue("2"))
    }

    #[test]
    fn test_finish_applies_to_current_request() {
        let (_, second) = two_requests();
        let mut cover = Cover::default();
        cover.begin(second, CoverState::Loading);

        assert!(cover.finish(second, Err("404".into())));
        assert!(matches!(cover.state(), Some(CoverState::Unavailable)));
    }

    #[test]
    fn test_late_download_is_ignored() {
        let (first, second) = two_requests();
        let mut cover = Cover::default();
        cover.begin(second, CoverState::Loading);

        let handle = image::Handle::from_bytes(vec![0u8; 4]);
        assert!(!cover.finish(first, Ok(handle)));
        assert!(matches!(cover.state(), Some(CoverState::Loading)));

        cover.clear();
        assert!(cover.state().is_none());
    }
}
