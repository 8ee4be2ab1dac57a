use {
    crate::{
        buffer::vec::ObservableVec,
        error::Result,
        view::{
            event::StructuralEvent, list::ListView, routed::Observable,
            subscription::Subscription, Observer,
        },
    },
    async_std::{
        io::{BufRead, BufReadExt},
        stream::StreamExt,
    },
    serde::{de::DeserializeOwned, Serialize},
    std::{
        io::Write,
        marker::PhantomData,
        sync::{Arc, RwLock},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Writes every routed event as one line of JSON.
pub struct VecJsonWriter<T, W>
where
    T: Clone + Send + Sync + 'static,
    W: Write + Send + Sync,
{
    out: W,
    lines: usize,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, W> VecJsonWriter<T, W>
where
    T: Clone + Serialize + Send + Sync + 'static,
    W: Write + Send + Sync,
{
    fn write_event(&mut self, ev: &StructuralEvent<T>) -> Result<()> {
        serde_json::to_writer(&mut self.out, ev)?;
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Number of events written so far, including the snapshot.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl<T, W> Observer<dyn ListView<T>> for VecJsonWriter<T, W>
where
    T: Clone + Serialize + Send + Sync + 'static,
    W: Write + Send + Sync,
{
    fn reset(&mut self, view: &dyn ListView<T>) -> Result<()> {
        self.write_event(&StructuralEvent::Reset)?;

        let items = view.iter().cloned().collect::<Vec<_>>();
        if !items.is_empty() {
            self.write_event(&StructuralEvent::add_range(items, 0))?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn notify(&mut self, _view: &dyn ListView<T>, ev: &StructuralEvent<T>) -> Result<()> {
        self.write_event(ev)?;
        self.out.flush()?;
        Ok(())
    }
}

/// A running JSON log; writing stops when it is dropped.
pub struct JsonLog<T, W>
where
    T: Clone + Send + Sync + 'static,
    W: Write + Send + Sync,
{
    writer: Arc<RwLock<VecJsonWriter<T, W>>>,
    _subscription: Subscription,
}

impl<T, W> JsonLog<T, W>
where
    T: Clone + Send + Sync + 'static,
    W: Write + Send + Sync,
{
    pub fn writer(&self) -> &Arc<RwLock<VecJsonWriter<T, W>>> {
        &self.writer
    }
}

pub trait SerializeJson<T>: Observable<T>
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    /// Logs the current contents as `Reset` plus one `Add`, then every
    /// later event, one JSON document per line.
    fn serialize_json<W>(&self, out: W) -> Result<JsonLog<T, W>>
    where
        W: Write + Send + Sync + 'static,
    {
        let writer = Arc::new(RwLock::new(VecJsonWriter {
            out,
            lines: 0,
            _phantom: PhantomData,
        }));
        let subscription = self.add_observer(writer.clone())?;

        Ok(JsonLog {
            writer,
            _subscription: subscription,
        })
    }
}

impl<T, O> SerializeJson<T> for O
where
    T: Clone + Serialize + Send + Sync + 'static,
    O: Observable<T> + ?Sized,
{
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<T> ObservableVec<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Applies every event of a JSON log in order and returns how many
    /// were applied. Blank lines are skipped.
    pub async fn from_json<R: BufRead + Unpin>(&self, read: R) -> Result<usize> {
        let mut lines = read.lines();
        let mut applied = 0;

        while let Some(line) = lines.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let ev = serde_json::from_str::<StructuralEvent<T>>(&line)?;
            self.apply(ev)?;
            applied += 1;
        }

        tracing::debug!(applied, len = self.len(), "json log replayed");
        Ok(applied)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
