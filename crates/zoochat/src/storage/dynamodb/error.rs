//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `zoochat_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use zoochat_core::storage::RepositoryError;

const THROTTLED: &str = "Throughput exceeded, please retry";
const LIMITED: &str = "Request limit exceeded, please retry";
const INTERNAL: &str = "DynamoDB internal server error";
const MISSING_TABLE: &str = "Table not found";

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    let message = match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => MISSING_TABLE.to_string(),
        GetItemError::ProvisionedThroughputExceededException(_) => THROTTLED.to_string(),
        GetItemError::RequestLimitExceeded(_) => LIMITED.to_string(),
        GetItemError::InternalServerError(_) => INTERNAL.to_string(),
        err => format!("GetItem failed: {err:?}"),
    };
    RepositoryError::QueryFailed(message)
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    let message = match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => MISSING_TABLE.to_string(),
        QueryError::ProvisionedThroughputExceededException(_) => THROTTLED.to_string(),
        QueryError::RequestLimitExceeded(_) => LIMITED.to_string(),
        QueryError::InternalServerError(_) => INTERNAL.to_string(),
        err => format!("Query failed: {err:?}"),
    };
    RepositoryError::QueryFailed(message)
}

/// Map a conditional create (`attribute_not_exists`) failure.
///
/// A failed condition means the key is already taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let conflict = RepositoryError::AlreadyExists {
        entity_type,
        id: id.into(),
    };
    put_item_failure(err.into_service_error(), conflict)
}

/// Map a conditional replace (`attribute_exists`) failure.
///
/// A failed condition means there was nothing to replace.
pub fn map_replace_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let missing = RepositoryError::NotFound {
        entity_type,
        id: id.into(),
    };
    put_item_failure(err.into_service_error(), missing)
}

fn put_item_failure(err: PutItemError, on_condition: RepositoryError) -> RepositoryError {
    let message = match err {
        PutItemError::ConditionalCheckFailedException(_) => return on_condition,
        PutItemError::ResourceNotFoundException(_) => MISSING_TABLE.to_string(),
        PutItemError::ProvisionedThroughputExceededException(_) => THROTTLED.to_string(),
        PutItemError::RequestLimitExceeded(_) => LIMITED.to_string(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            "Item collection size limit exceeded".to_string()
        }
        PutItemError::TransactionConflictException(_) => {
            "Transaction conflict, please retry".to_string()
        }
        PutItemError::InternalServerError(_) => INTERNAL.to_string(),
        err => format!("PutItem failed: {err:?}"),
    };
    RepositoryError::QueryFailed(message)
}

/// Map a DeleteItem SDK error to RepositoryError.
///
/// Conditional deletes (`attribute_exists`) report `NotFound`.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let message = match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            return RepositoryError::NotFound {
                entity_type,
                id: id.into(),
            }
        }
        DeleteItemError::ResourceNotFoundException(_) => MISSING_TABLE.to_string(),
        DeleteItemError::ProvisionedThroughputExceededException(_) => THROTTLED.to_string(),
        DeleteItemError::RequestLimitExceeded(_) => LIMITED.to_string(),
        DeleteItemError::TransactionConflictException(_) => {
            "Transaction conflict, please retry".to_string()
        }
        DeleteItemError::InternalServerError(_) => INTERNAL.to_string(),
        err => format!("DeleteItem failed: {err:?}"),
    };
    RepositoryError::QueryFailed(message)
}
