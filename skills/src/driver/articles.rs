// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Operations on articles.

use crate::db;
use crate::driver::views::Resolver;
use crate::driver::{invalid_reference, Driver};
use crate::model::*;
use skills_core::db::{DbResult, Executor};
use skills_core::driver::DriverResult;

/// Checks that the entities referenced by `data` exist.
async fn validate_references(ex: &mut Executor, data: &ArticleData) -> DriverResult<()> {
    let author = *data.author();
    db::get_employee(ex, author).await.map_err(invalid_reference("author", author))?;
    Ok(())
}

/// Builds the view of the article `id` after writing `data` to it.
async fn written_view(
    ex: &mut Executor,
    id: ArticleId,
    data: ArticleData,
) -> DbResult<ArticleView> {
    Resolver::new(ex).article_view(ArticleRow::new(id, data)).await
}

impl Driver {
    /// Gets all articles that match `filter`.
    pub(crate) async fn list_articles(
        self,
        filter: ArticleFilter,
    ) -> DriverResult<Vec<ArticleView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_articles(tx.ex(), &filter).await?;
        let views = Resolver::new(tx.ex()).article_views(rows).await?;
        tx.commit().await?;
        Ok(views)
    }

    /// Gets the article `id`.
    pub(crate) async fn get_article(self, id: ArticleId) -> DriverResult<ArticleView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_article(tx.ex(), id).await?;
        let view = Resolver::new(tx.ex()).article_view(row).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Creates a new article with `data`.
    pub(crate) async fn create_article(self, data: ArticleData) -> DriverResult<ArticleView> {
        let mut tx = self.db.begin().await?;
        validate_references(tx.ex(), &data).await?;
        let id = db::create_article(tx.ex(), &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Replaces all fields of the article `id` with `data`.
    pub(crate) async fn update_article(
        self,
        id: ArticleId,
        data: ArticleData,
    ) -> DriverResult<ArticleView> {
        let mut tx = self.db.begin().await?;
        db::get_article(tx.ex(), id).await?;
        validate_references(tx.ex(), &data).await?;
        db::update_article(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Updates the fields of the article `id` present in `patch`.
    pub(crate) async fn patch_article(
        self,
        id: ArticleId,
        patch: ArticlePatch,
    ) -> DriverResult<ArticleView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_article(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        validate_references(tx.ex(), &data).await?;
        db::update_article(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Deletes the article `id`.
    pub(crate) async fn delete_article(self, id: ArticleId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_article(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use skills_core::db::DbError;
    use skills_core::driver::DriverError;
    use skills_core::rest::RestError;

    #[tokio::test]
    async fn test_list_articles_embeds_author_and_department() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, dept).await;
        let first = context.create_article("Rust in production", alice).await;
        context.create_article("Quarterly report", alice).await;

        let filter = ArticleFilter { search: Some("rust".to_owned()) };
        let views = context.driver().list_articles(filter).await.unwrap();
        assert_eq!(1, views.len());
        assert_eq!(first, views[0].id);
        assert_eq!(alice, views[0].author.id);
        assert_eq!("Engineering", views[0].author.department.title.as_str());

        let views = context.driver().list_articles(ArticleFilter::default()).await.unwrap();
        assert_eq!(2, views.len());
    }

    #[tokio::test]
    async fn test_create_and_get_article() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, dept).await;

        let data = ArticleData::new(Title::new("Hello").unwrap(), "World".to_owned(), alice);
        let created = context.driver().create_article(data).await.unwrap();
        assert_eq!("World", created.content);

        assert_eq!(created, context.driver().get_article(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_article_unknown_author() {
        let context = TestContext::setup().await;

        let title = Title::new("Hello").unwrap();
        let data = ArticleData::new(title, "".to_owned(), EmployeeId::new(4));
        assert_eq!(
            DriverError::InvalidInput(
                "author: Invalid pk \"4\" - object does not exist.".to_owned()
            ),
            context.driver().create_article(data).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_dangling_author_rejected_by_schema_is_invalid_input() {
        let context = TestContext::setup().await;

        let title = Title::new("Hello").unwrap();
        let data = ArticleData::new(title, "".to_owned(), EmployeeId::new(42));
        let err = db::create_article(&mut context.ex().await, &data).await.unwrap_err();
        assert_eq!(DbError::ForeignKeyViolation, err);

        let err = DriverError::from(err);
        assert!(matches!(err, DriverError::InvalidInput(_)));
        assert!(matches!(RestError::from(err), RestError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_update_and_patch_article() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, dept).await;
        let bob = context.create_employee("Bob", 40, dept).await;
        let id = context.create_article("Hello", alice).await;

        let data = ArticleData::new(Title::new("Bye").unwrap(), "".to_owned(), bob);
        let view = context.driver().update_article(id, data).await.unwrap();
        assert_eq!("Bye", view.title.as_str());
        assert_eq!("", view.content);
        assert_eq!(bob, view.author.id);

        let patch: ArticlePatch =
            serde_json::from_value(serde_json::json!({"content": "Later"})).unwrap();
        let view = context.driver().patch_article(id, patch).await.unwrap();
        assert_eq!("Bye", view.title.as_str());
        assert_eq!("Later", view.content);
    }

    #[tokio::test]
    async fn test_delete_article() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, dept).await;
        let id = context.create_article("Hello", alice).await;

        context.driver().delete_article(id).await.unwrap();
        assert_eq!(
            DbError::NotFound,
            db::get_article(&mut context.ex().await, id).await.unwrap_err()
        );

        assert_eq!(
            DriverError::NotFound("Entity not found".to_owned()),
            context.driver().delete_article(id).await.unwrap_err()
        );
    }
}
