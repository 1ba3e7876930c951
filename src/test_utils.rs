//! In-memory collaborators for tests.
//!
//! Compiled for unit tests and under the `test-utils` feature, which the
//! integration tests enable through the self dev-dependency.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogmesh_auth::{TokenVerifier, VerifyError};
use blogmesh_config::{CorsConfig, JwtConfig};
use blogmesh_core::{AppError, Identity};
use blogmesh_models::blogs::Blog;
use blogmesh_models::comments::Comment;
use blogmesh_models::profiles::Profile;
use blogmesh_models::users::User;

use crate::health::ReadinessCheck;
use crate::modules::auth::repository::{UserRepository, user_exists_error};
use crate::modules::blogs::repository::BlogRepository;
use crate::modules::comments::directory::BlogDirectory;
use crate::modules::comments::repository::CommentRepository;
use crate::modules::profiles::repository::ProfileRepository;
use crate::state::{AuthState, BlogState, CommentState, ProfileState, Readiness, Verifier};

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

/// Verifier backed by a fixed token table. Counts every call.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Identity>,
    calls: AtomicUsize,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, identity: Identity) -> Self {
        self.tokens.insert(token.to_string(), identity);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .get(token)
            .cloned()
            .ok_or(VerifyError::Rejected(401))
    }
}

/// Readiness that can be flipped at runtime.
#[derive(Clone)]
pub struct StaticReadiness(Arc<AtomicBool>);

impl StaticReadiness {
    pub fn new(ready: bool) -> Self {
        Self(Arc::new(AtomicBool::new(ready)))
    }

    pub fn set(&self, ready: bool) {
        self.0.store(ready, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReadinessCheck for StaticReadiness {
    async fn is_ready(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.remove(&id);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(user_exists_error());
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists(&self, email: &str, username: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.email == email || u.username == username))
    }
}

#[derive(Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub async fn get(&self, id: Uuid) -> Option<Blog> {
        self.blogs.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.blogs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blogs.read().await.is_empty()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, blog: &Blog) -> Result<Blog, AppError> {
        self.blogs.write().await.insert(blog.id, blog.clone());
        Ok(blog.clone())
    }

    async fn find_all(&self) -> Result<Vec<Blog>, AppError> {
        let mut blogs: Vec<Blog> = self.blogs.read().await.values().cloned().collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        Ok(self.get(id).await)
    }

    async fn update(&self, blog: &Blog) -> Result<Option<Blog>, AppError> {
        let mut blogs = self.blogs.write().await;
        Ok(blogs.get_mut(&blog.id).map(|stored| {
            stored.title = blog.title.clone();
            stored.content = blog.content.clone();
            stored.tags = blog.tags.clone();
            stored.updated_at = blog.updated_at;
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.blogs.write().await.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryCommentRepository {
    pub async fn get(&self, id: Uuid) -> Option<Comment> {
        self.comments.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.comments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.comments.read().await.is_empty()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<Comment, AppError> {
        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .await
            .values()
            .filter(|c| c.blog == blog_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        Ok(self.get(id).await)
    }

    async fn update(&self, comment: &Comment) -> Result<Option<Comment>, AppError> {
        let mut comments = self.comments.write().await;
        Ok(comments.get_mut(&comment.id).map(|stored| {
            stored.content = comment.content.clone();
            stored.updated_at = comment.updated_at;
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.comments.write().await.remove(&id).is_some())
    }
}

/// Keyed by owner, so a second profile for the same user is impossible.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileRepository {
    pub async fn get(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles.read().await.get(&user_id).cloned()
    }

    pub async fn count_for(&self, user_id: Uuid) -> usize {
        self.profiles
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .count()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile, AppError> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .entry(profile.user_id)
            .and_modify(|existing| {
                existing.bio = profile.bio.clone();
                existing.location = profile.location.clone();
                existing.website = profile.website.clone();
                existing.social = profile.social.clone();
                existing.interests = profile.interests.clone();
                existing.updated_at = profile.updated_at;
            })
            .or_insert_with(|| profile.clone());
        Ok(stored.clone())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.profiles.write().await.remove(&user_id).is_some())
    }
}

/// Blog directory answering from a fixed set of ids.
#[derive(Default)]
pub struct StaticBlogDirectory {
    blogs: std::sync::RwLock<HashSet<Uuid>>,
}

impl StaticBlogDirectory {
    pub fn with_blog(self, id: Uuid) -> Self {
        if let Ok(mut blogs) = self.blogs.write() {
            blogs.insert(id);
        }
        self
    }
}

#[async_trait]
impl BlogDirectory for StaticBlogDirectory {
    async fn blog_exists(&self, blog_id: Uuid) -> bool {
        self.blogs
            .read()
            .map(|blogs| blogs.contains(&blog_id))
            .unwrap_or(false)
    }
}

pub fn auth_state(users: Arc<InMemoryUserRepository>) -> AuthState {
    AuthState {
        users,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::default(),
        readiness: Readiness::new("auth-service", StaticReadiness::new(true)),
    }
}

pub fn blog_state(
    blogs: Arc<InMemoryBlogRepository>,
    verifier: Arc<StaticTokenVerifier>,
) -> BlogState {
    BlogState {
        blogs,
        verifier: Verifier(verifier),
        cors_config: CorsConfig::default(),
        readiness: Readiness::new("blog-service", StaticReadiness::new(true)),
    }
}

pub fn comment_state(
    comments: Arc<InMemoryCommentRepository>,
    directory: StaticBlogDirectory,
    verifier: Arc<StaticTokenVerifier>,
) -> CommentState {
    CommentState {
        comments,
        blog_directory: Arc::new(directory),
        verifier: Verifier(verifier),
        cors_config: CorsConfig::default(),
        readiness: Readiness::new("comment-service", StaticReadiness::new(true)),
    }
}

pub fn profile_state(
    profiles: Arc<InMemoryProfileRepository>,
    verifier: Arc<StaticTokenVerifier>,
) -> ProfileState {
    ProfileState {
        profiles,
        verifier: Verifier(verifier),
        cors_config: CorsConfig::default(),
        readiness: Readiness::new("profile-service", StaticReadiness::new(true)),
    }
}
