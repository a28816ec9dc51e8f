use super::album_size::AlbumSizeHandler;
use crate::event::event_bus::EventBus;
use crate::projector::album_size::{AlbumSizeCounter, AlbumSizeProjector};
use model::access::AlbumAccessResolver;
use model::album_size::AlbumSizeWriter;
use model::catalog::MediaCounter;
use std::sync::Arc;

pub async fn register_handlers<B: EventBus + Clone + 'static>(
    bus: &mut B,
    // 端口依赖
    access_resolver: Arc<dyn AlbumAccessResolver>,
    media_counter: Arc<dyn MediaCounter>,
    album_size_writer: Arc<dyn AlbumSizeWriter>,
) {
    // 创建投影器
    let album_size_projector = AlbumSizeProjector::new(
        AlbumSizeCounter::new(access_resolver, media_counter),
        album_size_writer,
    );

    // 注册处理器到事件总线
    bus.subscribe::<domain::media::MediaEvent>(Arc::new(AlbumSizeHandler::new(
        album_size_projector,
    )))
    .await;
}
