pub mod attribute;
pub mod record;
pub mod subject;

pub use attribute::{AttributeGroup, GroupType, RATING_MAX, RATING_MIN};
pub use record::{
    PendingWrite, ScoreRecord, SessionDescriptor, SessionRef, ZonePoint, SESSION_DATE_FORMAT,
};
pub use subject::{Position, Subject};
