//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{HistoryStore, RoomRegistry, UserChatIndex},
    usecase::{
        CloseChatUseCase, CreateChatUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinChatUseCase, LeaveRoomsUseCase, ListChatsUseCase, ListUserChatsUseCase,
        SendMessageUseCase,
    },
};

/// Default capacity of each connection's outbound queue.
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

pub struct AppState {
    pub create_chat_usecase: Arc<CreateChatUseCase>,
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub close_chat_usecase: Arc<CloseChatUseCase>,
    pub list_chats_usecase: Arc<ListChatsUseCase>,
    pub list_user_chats_usecase: Arc<ListUserChatsUseCase>,
    pub leave_rooms_usecase: Arc<LeaveRoomsUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// Capacity of each connection's outbound queue
    pub outbound_buffer: usize,
}

impl AppState {
    /// Wire every use case against the given stores.
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        history: Arc<dyn HistoryStore>,
        user_chats: Arc<dyn UserChatIndex>,
        outbound_buffer: usize,
    ) -> Self {
        Self {
            create_chat_usecase: Arc::new(CreateChatUseCase::new(
                registry.clone(),
                history.clone(),
                user_chats.clone(),
            )),
            join_chat_usecase: Arc::new(JoinChatUseCase::new(registry.clone(), history.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(registry.clone(), history)),
            close_chat_usecase: Arc::new(CloseChatUseCase::new(
                registry.clone(),
                user_chats.clone(),
            )),
            list_chats_usecase: Arc::new(ListChatsUseCase::new(registry.clone())),
            list_user_chats_usecase: Arc::new(ListUserChatsUseCase::new(user_chats)),
            leave_rooms_usecase: Arc::new(LeaveRoomsUseCase::new(registry.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(registry.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry)),
            outbound_buffer,
        }
    }
}
