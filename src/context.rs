//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::habitica::HabiticaClient;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingIdGenerator, RecordingRemoteTasks,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingIdGenerator, ReplayingRemoteTasks,
};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Credentials;
use crate::ports::{Clock, FileSystem, IdGenerator, NewTask, RemoteTask, RemoteTasks, TaskFuture};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Clock for obtaining the current local time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for the schedule, ledger and lease files.
    pub fs: Box<dyn FileSystem>,
    /// Run ids for lease holders.
    pub ids: Box<dyn IdGenerator>,
    /// Remote todo list.
    pub tasks: Box<dyn RemoteTasks>,
}

impl ServiceContext {
    /// Assembles a context from explicit adapters, with random run ids.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, fs: Box<dyn FileSystem>, tasks: Box<dyn RemoteTasks>) -> Self {
        Self { clock, fs, ids: Box::new(LiveIdGenerator), tasks }
    }

    /// Replaces the run id source.
    #[must_use]
    pub fn with_ids(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Creates a live context talking to the Habitica API at `api_url`.
    #[must_use]
    pub fn live(credentials: Credentials, api_url: &str) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            ids: Box::new(LiveIdGenerator),
            tasks: Box::new(HabiticaClient::new(api_url, credentials)),
        }
    }

    /// Creates a context for local-only commands.
    ///
    /// The remote task port panics when called.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            ids: Box::new(LiveIdGenerator),
            tasks: Box::new(PanickingRemoteTasks),
        }
    }

    /// Wraps every port of `inner` so its calls are appended to the
    /// session's cassette.
    ///
    /// Drop the returned context before calling [`RecordingSession::finish`].
    #[must_use]
    pub fn recording(inner: Self, session: &RecordingSession) -> Self {
        Self {
            clock: Box::new(RecordingClock::new(inner.clock, session.recorder())),
            fs: Box::new(RecordingFileSystem::new(inner.fs, session.recorder())),
            ids: Box::new(RecordingIdGenerator::new(inner.ids, session.recorder())),
            tasks: Box::new(RecordingRemoteTasks::new(inner.tasks, session.recorder())),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// All ports share one replayer; each port/method pair keeps its own
    /// cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::from_file(path)?));
        Ok(Self {
            clock: Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            fs: Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            ids: Box::new(ReplayingIdGenerator::new(Arc::clone(&replayer))),
            tasks: Box::new(ReplayingRemoteTasks::new(replayer)),
        })
    }
}

struct PanickingRemoteTasks;

impl RemoteTasks for PanickingRemoteTasks {
    fn list_todos(&self) -> TaskFuture<'_, Vec<RemoteTask>> {
        panic!("RemoteTasks port not configured: this command runs offline");
    }

    fn create_todo(&self, _task: &NewTask) -> TaskFuture<'_, ()> {
        panic!("RemoteTasks port not configured: this command runs offline");
    }

    fn delete_todo(&self, _id: &str) -> TaskFuture<'_, ()> {
        panic!("RemoteTasks port not configured: this command runs offline");
    }
}
