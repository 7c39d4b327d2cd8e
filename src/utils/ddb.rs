use std::collections::HashMap;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::{parse_date, serializer::time_to_json};

// creates a table with a numeric hash key, e.g. books keyed by book_id
pub(crate) async fn create_table(client: &Client, table_name: &str, pk: &str) -> LibraryResult<()> {
    match client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk)
                .attribute_type(ScalarAttributeType::N)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        )
        .send()
        .await
    {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to delete {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        match describe_table(client, table_name).await {
            Ok(status) => {
                if status != other_status {
                    return;
                }
            }
            Err(err) => {
                debug!("waiting for {} table: {}", table_name, err);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(LibraryError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse {:?}", other)),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<String> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return Some(str.clone());
    }
    None
}

pub(crate) fn parse_date_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<NaiveDateTime> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return parse_date(str);
    }
    None
}

pub(crate) fn string_date(date: NaiveDateTime) -> AttributeValue {
    AttributeValue::S(time_to_json(date))
}

pub(crate) fn parse_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<i64> {
    if let Some(AttributeValue::N(str)) = map.get(name) {
        return str.parse::<i64>().ok();
    }
    None
}

pub(crate) fn number_attribute(n: i64) -> AttributeValue {
    AttributeValue::N(n.to_string())
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

// helper method to build db-client for the configured store
pub(crate) async fn build_db_client(config: &Configuration) -> Client {
    match config.store {
        RepositoryStore::LocalDynamoDB => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(config.dynamodb_endpoint.as_str())
                .build();
            Client::from_conf(dynamodb_local_config)
        }
        _ => {
            //Get config from environment.
            let sdk_config = aws_config::load_from_env().await;
            Client::new(&sdk_config)
        }
    }
}

pub(crate) fn put_conditional_check_failed(err: &SdkError<PutItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

pub(crate) fn update_conditional_check_failed(err: &SdkError<UpdateItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

pub(crate) fn delete_conditional_check_failed(err: &SdkError<DeleteItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

impl From<SdkError<UpdateItemError>> for LibraryError {
    fn from(err: SdkError<UpdateItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DeleteItemError>> for LibraryError {
    fn from(err: SdkError<DeleteItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<GetItemError>> for LibraryError {
    fn from(err: SdkError<GetItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<ScanError>> for LibraryError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// throughput errors read "...ProvisionedThroughputExceeded..." or "...LimitExceeded..."
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    if let Some(b) = opts {
        return b.windows(6).any(|w| w == b"ceeded");
    }
    false
}
