use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use tracing::debug;

use crate::books::domain::model::{BookEntity, BookPatch};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{delete_conditional_check_failed, number_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, put_conditional_check_failed, string_date, update_conditional_check_failed};

const SCAN_PAGE_SIZE: i32 = 500;

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity, BookPatch> for DDBBookRepository {
    // scans every page; the HTTP surface does not paginate
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .limit(SCAN_PAGE_SIZE)
                .send()
                .await.map_err(LibraryError::from)?;
            books.extend(res.items().unwrap_or_default().iter().map(map_to_book).collect::<LibraryResult<Vec<_>>>()?);
            exclusive_start_key = res.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
            debug!("scanning next page of {} after {} books", table_name, books.len());
        }
        books.sort_by_key(|b| b.book_id);
        Ok(books)
    }

    async fn find_one(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", number_attribute(id))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from)?;
        res.item().map(map_to_book).transpose()
    }

    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        match self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(err) if put_conditional_check_failed(&err) => {
                Err(LibraryError::duplicate_key(format!("book already exists for {}", entity.book_id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn update(&self, id: i64, patch: &BookPatch) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        // attribute names go through placeholders so reserved words never clash
        let mut set_expr = vec!["#updated_at = :updated_at".to_string()];
        let mut request = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number_attribute(id))
            .expression_attribute_names("#updated_at", "updated_at")
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(book_id)");
        for (name, value) in [("title", &patch.title), ("author", &patch.author), ("description", &patch.description)] {
            if let Some(value) = value {
                set_expr.push(format!("#{} = :{}", name, name));
                request = request
                    .expression_attribute_names(format!("#{}", name), name)
                    .expression_attribute_values(format!(":{}", name), AttributeValue::S(value.to_string()));
            }
        }

        match request.update_expression(format!("SET {}", set_expr.join(", "))).send().await {
            Ok(_) => Ok(1),
            Err(err) if update_conditional_check_failed(&err) => Ok(0),
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        match self.client.delete_item()
            .table_name(table_name)
            .key("book_id", number_attribute(id))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(err) if delete_conditional_check_failed(&err) => Ok(0),
            Err(err) => Err(LibraryError::from(err)),
        }
    }
}

impl BookRepository for DDBBookRepository {}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> LibraryResult<BookEntity> {
    let book_id = parse_number_attribute("book_id", map)
        .ok_or_else(|| LibraryError::serialization(format!("book item without numeric book_id {:?}", map).as_str()))?;
    let missing = |name: &str| LibraryError::serialization(
        format!("book item {} without {}", book_id, name).as_str());
    Ok(BookEntity {
        book_id,
        title: parse_string_attribute("title", map).ok_or_else(|| missing("title"))?,
        author: parse_string_attribute("author", map).ok_or_else(|| missing("author"))?,
        description: parse_string_attribute("description", map).ok_or_else(|| missing("description"))?,
        created_at: parse_date_attribute("created_at", map).ok_or_else(|| missing("created_at"))?,
        updated_at: parse_date_attribute("updated_at", map).ok_or_else(|| missing("updated_at"))?,
    })
}
