use crate::error::Result;
use std::future::Future;
use tokio::task::JoinSet;

/// Spawns every future as its own task and returns their outputs in
/// submission order, whatever order they finish in.
///
/// Returns at the first failure. Dropping the set aborts the tasks that are
/// still in flight.
pub(crate) async fn join_in_order<I, F, T>(futures: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut set = JoinSet::new();
    for (idx, future) in futures.into_iter().enumerate() {
        set.spawn(async move { (idx, future.await) });
    }

    let mut slots = (0..set.len()).map(|_| None).collect::<Vec<_>>();
    while let Some(joined) = set.join_next().await {
        let (idx, output) = joined?;
        slots[idx] = Some(output?);
    }
    Ok(slots.into_iter().flatten().collect())
}
