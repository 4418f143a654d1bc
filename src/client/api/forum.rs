use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::{
        api::PaginatedDto,
        forum::{
            CategoryDto, CategoryPayloadDto, PostDto, PostPayloadDto, SetThreadClosedDto,
            ThreadDto, ThreadPayloadDto,
        },
    },
};

impl ApiClient {
    // categories

    pub async fn create_category(&self, payload: &CategoryPayloadDto) -> Result<CategoryDto, ApiError> {
        let response = self
            .post("/api/forum/categories")
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_categories(
        &self,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<CategoryDto>, ApiError> {
        let response = self
            .get_page("/api/forum/categories", page, entries)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_category(&self, id: i32) -> Result<CategoryDto, ApiError> {
        let response = self
            .get(&format!("/api/forum/categories/{}", id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_category(
        &self,
        id: i32,
        payload: &CategoryPayloadDto,
    ) -> Result<CategoryDto, ApiError> {
        let response = self
            .put(&format!("/api/forum/categories/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/forum/categories/{}", id))
            .send()
            .await?;
        parse_empty_response(response).await
    }

    // threads

    pub async fn get_threads(
        &self,
        category_id: i32,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<ThreadDto>, ApiError> {
        let response = self
            .get_page(
                &format!("/api/forum/categories/{}/threads", category_id),
                page,
                entries,
            )
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn create_thread(
        &self,
        category_id: i32,
        payload: &ThreadPayloadDto,
    ) -> Result<ThreadDto, ApiError> {
        let response = self
            .post(&format!("/api/forum/categories/{}/threads", category_id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_thread(&self, id: i32) -> Result<ThreadDto, ApiError> {
        let response = self
            .get(&format!("/api/forum/threads/{}", id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_thread(
        &self,
        id: i32,
        payload: &ThreadPayloadDto,
    ) -> Result<ThreadDto, ApiError> {
        let response = self
            .put(&format!("/api/forum/threads/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn set_thread_closed(&self, id: i32, closed: bool) -> Result<ThreadDto, ApiError> {
        let response = self
            .put(&format!("/api/forum/threads/{}/closed", id))
            .json(&SetThreadClosedDto { closed })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_thread(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/forum/threads/{}", id))
            .send()
            .await?;
        parse_empty_response(response).await
    }

    // posts

    pub async fn get_posts(
        &self,
        thread_id: i32,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<PostDto>, ApiError> {
        let response = self
            .get_page(
                &format!("/api/forum/threads/{}/posts", thread_id),
                page,
                entries,
            )
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn create_post(&self, thread_id: i32, content: &str) -> Result<PostDto, ApiError> {
        let response = self
            .post(&format!("/api/forum/threads/{}/posts", thread_id))
            .json(&PostPayloadDto {
                content: content.to_string(),
            })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_post(&self, id: i32) -> Result<PostDto, ApiError> {
        let response = self
            .get(&format!("/api/forum/posts/{}", id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_post(&self, id: i32, content: &str) -> Result<PostDto, ApiError> {
        let response = self
            .put(&format!("/api/forum/posts/{}", id))
            .json(&PostPayloadDto {
                content: content.to_string(),
            })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_post(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/forum/posts/{}", id))
            .send()
            .await?;
        parse_empty_response(response).await
    }
}
