pub mod ids;
pub mod room;
pub mod user;

pub use ids::{IdError, RoomId, StrictUserIdParser, UserId, UserIdParser};

pub use room::{CreateRoomResponse, MembershipResponse, PeersResponse, RoomMembersResponse, RoomsResponse};

pub use user::{
    AuthFlow,
    AuthFlows,
    AuthRequest,
    AuthResponse,
    AvatarUrlRequest,
    AvatarUrlResponse,
    DisplayNameRequest,
    DisplayNameResponse,
    LoginType,
    UserProfile,
};
