//! Terminal mode: every stdin line is a new value of the search box, and
//! each settled outcome is printed to stdout.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use kensaku_api::{JikanClient, MediaKind, MediaRecord};
use kensaku_core::config::AppConfig;
use kensaku_core::{LookupController, LookupSettings, Outcome, Snapshot};

use crate::format;

pub fn run(config: &AppConfig, kind: MediaKind) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(config, kind))
}

async fn drive(config: &AppConfig, kind: MediaKind) -> io::Result<()> {
    let client = JikanClient::new(&config.api.base_url, config.api.timeout())
        .map_err(io::Error::other)?;
    let mut controller =
        LookupController::new(client, kind, LookupSettings::from(&config.search));
    let printer = tokio::spawn(print_outcomes(controller.subscribe(), io::stdout()));

    tracing::info!(%kind, "reading queries from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        controller.input_changed(line);
    }

    // EOF: let the last cycle finish before tearing down.
    let mut updates = controller.subscribe();
    let _ = updates.wait_for(Snapshot::is_settled).await;
    drop(controller);
    printer.await.map_err(io::Error::other)??;
    Ok(())
}

/// Write one block per completed cycle, once nothing else is pending.
/// Returns the writer when the controller goes away.
async fn print_outcomes<W: Write>(
    mut updates: watch::Receiver<Snapshot>,
    mut out: W,
) -> io::Result<W> {
    let mut printed = 0;
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if !snapshot.is_settled() || snapshot.completions == printed {
            continue;
        }
        printed = snapshot.completions;
        if let Some(rendered) = render(&snapshot.outcome) {
            writeln!(out, "{rendered}")?;
            out.flush()?;
        }
    }
    Ok(out)
}

/// Text for a settled outcome; `None` while idle or waiting on the API.
fn render(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Idle | Outcome::Pending { .. } => None,
        Outcome::Found(record) => Some(render_record(record)),
        Outcome::Failed(failure) => Some(format!("error: {failure}")),
    }
}

fn render_record(record: &MediaRecord) -> String {
    let mut lines = vec![format!("{} ({} #{})", record.title, record.kind, record.id)];
    lines.extend(
        format::fields(record)
            .into_iter()
            .map(|(label, value)| format!("  {label:<9} {value}")),
    );
    lines.push(format!(
        "  {:<9} {}",
        "Synopsis",
        format::synopsis(record.synopsis.as_deref())
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use kensaku_api::JikanError;
    use kensaku_core::LookupFailure;

    /// Answers 5114 with a record and everything else with a 404.
    struct Canned;

    impl kensaku_api::MediaLookup for Canned {
        async fn lookup(&self, kind: MediaKind, id: u64) -> Result<MediaRecord, JikanError> {
            if id == 5114 {
                Ok(MediaRecord {
                    kind,
                    ..fma()
                })
            } else {
                Err(JikanError::Api {
                    status: 404,
                    message: Some("Resource does not exist.".into()),
                })
            }
        }
    }

    fn fma() -> MediaRecord {
        MediaRecord {
            id: 5114,
            kind: MediaKind::Anime,
            title: "Fullmetal Alchemist: Brotherhood".into(),
            genres: vec!["Action".into(), "Drama".into()],
            score: Some(9.1),
            episodes: Some(64),
            chapters: None,
            volumes: None,
            year: Some("2009".into()),
            image_url: None,
            synopsis: Some("Two brothers search for the Philosopher's Stone.".into()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_prints_every_completed_cycle() {
        let mut controller =
            LookupController::new(Canned, MediaKind::Anime, LookupSettings::default());
        let printer = tokio::spawn(print_outcomes(controller.subscribe(), Vec::new()));

        for line in ["-3", "abc", "5114", "5114", "", "999999"] {
            controller.input_changed(line);
            tokio::time::sleep(Duration::from_millis(1100)).await;
        }
        drop(controller);

        let out = printer.await.unwrap().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("error: Please enter a valid numeric ID.").count(), 2);
        assert_eq!(
            text.matches("Fullmetal Alchemist: Brotherhood (Anime #5114)").count(),
            2
        );
        assert_eq!(text.matches("999999").count(), 1);
        assert_eq!(text.lines().filter(|l| l.starts_with("error:")).count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_prints_once() {
        let mut controller =
            LookupController::new(Canned, MediaKind::Anime, LookupSettings::default());
        let printer = tokio::spawn(print_outcomes(controller.subscribe(), Vec::new()));

        for partial in ["5", "51", "511", "5114"] {
            controller.input_changed(partial);
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        tokio::time::sleep(Duration::from_millis(1100)).await;
        drop(controller);

        let text = String::from_utf8(printer.await.unwrap().unwrap()).unwrap();
        assert_eq!(text.lines().next(), Some("Fullmetal Alchemist: Brotherhood (Anime #5114)"));
        assert_eq!(text.matches("(Anime #").count(), 1);
    }

    #[test]
    fn test_render_skips_unsettled() {
        assert_eq!(render(&Outcome::Idle), None);
        assert_eq!(render(&Outcome::Pending { id: 1 }), None);
    }

    #[test]
    fn test_render_failure() {
        let rendered = render(&Outcome::Failed(LookupFailure::InvalidId));
        assert_eq!(rendered.as_deref(), Some("error: Please enter a valid numeric ID."));
    }

    #[test]
    fn test_render_record() {
        let rendered = render(&Outcome::Found(fma())).unwrap_or_default();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Fullmetal Alchemist: Brotherhood (Anime #5114)");
        assert_eq!(lines[1], "  Genre     Action, Drama");
        assert_eq!(lines[2], "  Score     9.1");
        assert_eq!(lines[3], "  Episodes  64");
        assert_eq!(lines[4], "  Year      2009");
        assert!(lines[5].ends_with("Philosopher's Stone."));
    }
}
