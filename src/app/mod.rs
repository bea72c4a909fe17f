//! Application use cases and transactions.

mod lecture;

pub use lecture::{
    lecture_create, lecture_delete, lecture_due_soon, lecture_list, lecture_mark_notified,
    lecture_update, LectureCreateReq, LectureDto, LectureUpdateReq,
};
