use std::{fmt::Debug, hash::Hash};

use futures::{Stream, TryStreamExt};
use kube_client::Api;
use kube_core::Resource;
use kube_runtime::{reflector, watcher, WatchStreamExt};
use serde::de::DeserializeOwned;

use super::{Event, QualifiedName};

/// Subscriber yielding an event for each touched object of the type `dyntype`,
/// read through the (duck) type `K`.
///
/// `exists` is false once the object has left the reflector store,
/// i.e. the event is a deletion.
pub fn duck_objects<K: Resource>(
    api: Api<K>,
    watcher_config: watcher::Config,
    dyntype: K::DynamicType,
) -> impl Stream<Item = Result<Event<QualifiedName, K>, watcher::Error>>
where
    K: 'static + Debug + Clone + DeserializeOwned + Send,
    K::DynamicType: Clone + Eq + Hash,
{
    let writer = reflector::store::Writer::new(dyntype.clone());
    let store = writer.as_reader();

    reflector(writer, watcher(api, watcher_config))
        .touched_objects()
        .map_ok(move |resource| {
            let exists = store
                .get(&reflector::ObjectRef::from_obj_with(
                    &resource,
                    dyntype.clone(),
                ))
                .is_some();
            let key = QualifiedName::from_resource(&resource);
            log::debug!(
                "observed {}/{} (exists: {exists})",
                key.namespace.as_deref().unwrap_or_default(),
                key.name,
            );
            Event {
                key,
                entry: resource,
                exists,
            }
        })
}
