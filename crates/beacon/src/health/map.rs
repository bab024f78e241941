//! Map — domain status to protobuf conversion.

use crate::health::status::ServingStatus;
use crate::proto;

pub fn to_proto(status: ServingStatus) -> proto::ServingStatus {
    match status {
        ServingStatus::Unknown => proto::ServingStatus::Unknown,
        ServingStatus::Serving => proto::ServingStatus::Serving,
        ServingStatus::NotServing => proto::ServingStatus::NotServing,
    }
}
