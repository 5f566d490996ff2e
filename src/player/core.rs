use crate::{
    REFRESH_RATE,
    player::{PlaybackMetrics, PlayerCommand, PlayerStatus},
};
use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use rodio::{
    ChannelCount, Decoder, OutputStream, OutputStreamBuilder, SampleRate, Sink, Source,
};
use std::{
    fs::File,
    io::BufReader,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{debug, warn};

/// Owns the output stream. Lives on its own thread because the stream
/// handle cannot be moved between threads on every platform.
pub(crate) struct AudioCore {
    sink: Sink,
    commands: Receiver<PlayerCommand>,
    metrics: Arc<PlaybackMetrics>,
    ended: Arc<AtomicBool>,
    loaded: bool,
    _stream: OutputStream,
}

impl AudioCore {
    pub fn spawn(
        commands: Receiver<PlayerCommand>,
        metrics: Arc<PlaybackMetrics>,
        ready: Sender<Result<()>>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut stream = match OutputStreamBuilder::open_default_stream() {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = ready.send(Err(e.into()));
                    return;
                }
            };
            stream.log_on_drop(false);

            let sink = Sink::connect_new(stream.mixer());
            sink.set_volume(metrics.get_volume() as f32 / 100.0);

            let mut core = AudioCore {
                sink,
                commands,
                metrics,
                ended: Arc::new(AtomicBool::new(false)),
                loaded: false,
                _stream: stream,
            };

            let _ = ready.send(Ok(()));
            core.run();
        })
    }

    fn run(&mut self) {
        loop {
            match self.commands.recv_timeout(REFRESH_RATE) {
                Ok(PlayerCommand::Quit) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(cmd) => self.process_command(cmd),
                Err(RecvTimeoutError::Timeout) => (),
            }
            self.check_track_end();
            self.update_metrics();
        }

        self.sink.clear();
        debug!("Audio thread exiting");
    }

    fn process_command(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::Load(path, reply) => {
                let _ = reply.send(self.load(&path));
            }
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Seek(pos) => self.seek(pos),
            PlayerCommand::SetVolume(v) => self.set_volume(v),
            PlayerCommand::Quit => (),
        }
    }

    fn check_track_end(&mut self) {
        // `loaded` guards against reporting the same end twice
        if self.loaded && self.ended.load(Ordering::SeqCst) && self.sink.empty() {
            self.loaded = false;
            self.metrics.set_status(PlayerStatus::Ended);
        }
    }

    fn update_metrics(&self) {
        if self.loaded && self.metrics.get_status() == PlayerStatus::Playing {
            self.metrics.set_elapsed(self.sink.get_pos());
        }
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let source = match decode(path) {
            Ok(s) => s,
            Err(e) => {
                self.sink.clear();
                self.loaded = false;
                self.metrics.reset();
                self.metrics.set_status(PlayerStatus::Error);
                return Err(e);
            }
        };
        let duration = source.total_duration();

        self.ended.store(false, Ordering::SeqCst);
        let marked = EndMarker::new(source, Arc::clone(&self.ended));

        // `clear` leaves the sink paused until `Play` arrives
        self.sink.clear();
        self.sink.append(marked);
        self.loaded = true;

        self.metrics.reset();
        self.metrics.set_duration(duration);
        self.metrics.set_status(PlayerStatus::Idle);

        Ok(())
    }

    fn play(&mut self) {
        if self.loaded {
            self.sink.play();
            self.metrics.set_status(PlayerStatus::Playing);
        }
    }

    fn pause(&mut self) {
        if self.loaded {
            self.sink.pause();
            self.metrics.set_status(PlayerStatus::Paused);
        }
    }

    fn stop(&mut self) {
        self.sink.clear();
        self.loaded = false;
        self.ended.store(false, Ordering::SeqCst);
        self.metrics.reset();
        self.metrics.set_status(PlayerStatus::Stopped);
    }

    fn seek(&mut self, pos: Duration) {
        if !self.loaded {
            return;
        }
        match self.sink.try_seek(pos) {
            Ok(()) => self.metrics.set_elapsed(pos),
            Err(e) => warn!("Seek to {pos:?} failed: {e}"),
        }
    }

    fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.sink.set_volume(volume as f32 / 100.0);
        self.metrics.set_volume(volume);
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_coarse_seek(true)
        .with_seekable(true);

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let hint = match ext {
            "adif" | "adts" => "aac",
            "m4a" | "m4b" | "m4p" | "m4r" | "mp4" => "audio/mp4",
            "bit" | "mpga" => "mp3",
            "wave" => "wav",
            _ => ext,
        };
        builder = builder.with_hint(hint);
    }

    Ok(builder.build()?)
}

/// Passes samples through untouched and raises `ended` once the input runs dry.
pub(crate) struct EndMarker<I> {
    input: I,
    ended: Arc<AtomicBool>,
}

impl<I> EndMarker<I> {
    pub fn new(input: I, ended: Arc<AtomicBool>) -> Self {
        EndMarker { input, ended }
    }
}

impl<I> Iterator for EndMarker<I>
where
    I: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.input.next();
        if sample.is_none() {
            self.ended.store(true, Ordering::SeqCst);
        }
        sample
    }
}

impl<I> Source for EndMarker<I>
where
    I: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.input.try_seek(pos)
    }
}
