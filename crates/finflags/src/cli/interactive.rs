//! Interactive upload page.
//!
//! Reads one command per line. Submits run in the background, so the page
//! stays usable while a request is in flight; the result page is printed
//! whenever a submit navigates.

use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::{JoinError, JoinSet};

use crate::error::Result;
use crate::session::{Navigation, Session, SubmitOutcome};
use crate::upload::{SelectedFile, Uploader};
use crate::view;

const HELP: &str = "\
commands:
  select <path>   choose the file to upload
  submit          upload the selected file
  show            print the current page
  route           print the current route
  help            print this help
  quit            leave the page
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// `select <path>`
    Select(&'a str),
    /// `submit`
    Submit,
    /// `show`
    Show,
    /// `route`
    Route,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
    /// Blank line.
    Empty,
    /// Anything else.
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    /// Parse a line of input.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        match command {
            "" => Self::Empty,
            "select" if !rest.is_empty() => Self::Select(rest),
            "submit" => Self::Submit,
            "show" => Self::Show,
            "route" => Self::Route,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line),
        }
    }
}

struct Page<'s, U, W> {
    session: &'s Session<U>,
    output: W,
    surface_errors: bool,
}

impl<U: Uploader + 'static, W: AsyncWrite + Unpin> Page<'_, U, W> {
    async fn emit(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn show(&mut self) -> Result<()> {
        let snapshot = self.session.snapshot();
        let page = view::render_page(
            snapshot.route,
            snapshot.result.as_ref(),
            snapshot.selected.as_deref(),
        );
        self.emit(&page).await
    }

    async fn navigated(&mut self, navigation: &Navigation) -> Result<()> {
        let selected = self.session.selected_file_name();
        let page = view::render_page(
            navigation.route,
            Some(&navigation.result),
            selected.as_deref(),
        );
        self.emit(&page).await
    }

    async fn finished(&mut self, joined: std::result::Result<SubmitOutcome, JoinError>) -> Result<()> {
        match joined {
            Ok(SubmitOutcome::Failed(error)) if self.surface_errors => {
                self.emit(&format!("error: {error}\n")).await
            }
            Ok(_) => Ok(()),
            Err(error) => {
                tracing::error!(%error, "submit task failed");
                Ok(())
            }
        }
    }

    async fn select(&mut self, path: &str) -> Result<()> {
        match SelectedFile::from_path(Path::new(path)).await {
            Ok(file) => {
                self.session.select_file(Some(file));
                Ok(())
            }
            // A picker can't fail; treat an unreadable path as nothing picked
            Err(error) => self.emit(&format!("cannot select {path}: {error}\n")).await,
        }
    }
}

/// Run the page until `quit` or end of input.
///
/// On `quit`, in-flight submits are abandoned. At end of input they are
/// awaited first, so scripted input sees every response.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<U, R, W>(
    session: &Session<U>,
    input: R,
    output: W,
    surface_errors: bool,
) -> Result<()>
where
    U: Uploader + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut page = Page {
        session,
        output,
        surface_errors,
    };
    let mut lines = input.lines();
    let mut navigations = session.subscribe();
    let mut in_flight = JoinSet::new();

    page.show().await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Input::parse(&line) {
                    Input::Select(path) => page.select(path).await?,
                    Input::Submit => {
                        in_flight.spawn(session.submit());
                    }
                    Input::Show => page.show().await?,
                    Input::Route => {
                        let route = session.route();
                        page.emit(&format!("{}\n", route.path())).await?;
                    }
                    Input::Help => page.emit(HELP).await?,
                    Input::Quit => {
                        in_flight.abort_all();
                        return Ok(());
                    }
                    Input::Empty => {}
                    Input::Unknown(other) => {
                        page.emit(&format!("unknown command: {other} (try 'help')\n")).await?;
                    }
                }
            }
            Some(navigation) = navigations.recv() => page.navigated(&navigation).await?,
            Some(joined) = in_flight.join_next() => page.finished(joined).await?,
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        page.finished(joined).await?;
    }
    loop {
        match navigations.try_recv() {
            Ok(navigation) => page.navigated(&navigation).await?,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
        }
    }
    Ok(())
}
