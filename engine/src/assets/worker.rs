use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::{AssetError, AssetLoader, AssetSource, CharacterAsset, LoadTicket};

enum LoadCommand {
    Load {
        ticket: LoadTicket,
        source: AssetSource,
    },
    Shutdown,
}

/// A finished load, tagged with the ticket it was requested under.
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<CharacterAsset, AssetError>,
}

/// Runs an [`AssetLoader`] on a background thread.
///
/// Requests are processed in order; completions are polled from the tick
/// thread with [`AsyncLoads::try_recv`], which never blocks. Requests that
/// queue up behind a running load are collapsed: all but the newest complete
/// at once with [`AssetError::Superseded`].
///
/// Dropping the handle asks the worker to stop and detaches it. A load
/// already in progress runs to completion in the background; its result is
/// discarded.
pub struct AsyncLoads {
    tx_cmd: Sender<LoadCommand>,
    rx_done: Receiver<LoadCompletion>,
}

impl AsyncLoads {
    pub fn spawn(loader: Box<dyn AssetLoader>) -> Result<Self, AssetError> {
        let (tx_cmd, rx_cmd) = mpsc::channel::<LoadCommand>();
        let (tx_done, rx_done) = mpsc::channel::<LoadCompletion>();

        thread::Builder::new()
            .name("asset-load-worker".to_string())
            .spawn(move || worker_loop(loader, rx_cmd, tx_done))?;

        Ok(Self { tx_cmd, rx_done })
    }

    /// Queue a load under `ticket`.
    pub fn request(&self, ticket: LoadTicket, source: AssetSource) -> Result<(), AssetError> {
        tracing::debug!(generation = ticket.generation(), %source, "character load requested");
        self.tx_cmd
            .send(LoadCommand::Load { ticket, source })
            .map_err(|_| AssetError::WorkerGone)
    }

    pub fn try_recv(&self) -> Option<LoadCompletion> {
        self.rx_done.try_recv().ok()
    }
}

impl Drop for AsyncLoads {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(LoadCommand::Shutdown);
    }
}

fn worker_loop(
    loader: Box<dyn AssetLoader>,
    rx_cmd: Receiver<LoadCommand>,
    tx_done: Sender<LoadCompletion>,
) {
    while let Ok(LoadCommand::Load { ticket, source }) = rx_cmd.recv() {
        let Some((ticket, source)) = newest_request(&rx_cmd, &tx_done, ticket, source) else {
            break;
        };
        let result = pollster::block_on(loader.load(&source));
        if tx_done.send(LoadCompletion { ticket, result }).is_err() {
            break;
        }
    }
    tracing::debug!("asset load worker stopped");
}

/// Skip queued loads that a later request replaces. `None` means stop.
fn newest_request(
    rx_cmd: &Receiver<LoadCommand>,
    tx_done: &Sender<LoadCompletion>,
    mut ticket: LoadTicket,
    mut source: AssetSource,
) -> Option<(LoadTicket, AssetSource)> {
    loop {
        match rx_cmd.try_recv() {
            Ok(LoadCommand::Load {
                ticket: newer,
                source: newer_source,
            }) => {
                tracing::debug!(generation = ticket.generation(), "skipping superseded load");
                let skipped = LoadCompletion {
                    ticket,
                    result: Err(AssetError::Superseded),
                };
                tx_done.send(skipped).ok()?;
                ticket = newer;
                source = newer_source;
            }
            Ok(LoadCommand::Shutdown) => return None,
            Err(_) => return Some((ticket, source)),
        }
    }
}
