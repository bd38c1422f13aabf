//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the REST endpoints
//! used by `RepositoryClient`.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! mock.current_user("octo").await;
//! let client = mock.client().await;
//!
//! // Anonymous listing
//! mock.user_repos("octo").repo("hello-world", None, "main").get().await;
//!
//! // Repository-scoped endpoints
//! let ctx = mock.repo("octo", "hello-world");
//! ctx.repo_info().default_branch("develop").get().await;
//! ctx.contents("src").file("lib.rs").dir("bin").get().await;
//! ctx.branch("main").sha("tip").get().await;
//! ctx.commit("tip").message("Add docs").parents(&["c1"]).get().await;
//! ctx.commit("missing").get_not_found().await;
//! ```

use serde_json::json;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::client::RepositoryClient;
use super::transport::Credentials;

/// Create a mock user JSON object shaped like `GET /user`.
fn mock_user(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": 1,
        "node_id": "U_test",
        "avatar_url": "https://avatars.githubusercontent.com/u/1",
        "url": format!("https://api.github.com/users/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "repos_url": format!("https://api.github.com/users/{}/repos", login),
        "type": "User",
        "site_admin": false,
        "name": "The Octocat",
        "company": "@github",
        "blog": "https://github.blog",
        "location": "San Francisco",
        "email": null,
        "bio": null,
        "public_repos": 8,
        "followers": 20,
        "following": 3
    })
}

/// Create a mock repository JSON object shaped like a listing entry.
fn mock_repository(
    id: u64,
    owner: &str,
    repo: &str,
    description: Option<&str>,
    default_branch: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "node_id": "R_test",
        "name": repo,
        "full_name": format!("{}/{}", owner, repo),
        "private": false,
        "html_url": format!("https://github.com/{}/{}", owner, repo),
        "description": description,
        "fork": false,
        "url": format!("https://api.github.com/repos/{}/{}", owner, repo),
        "clone_url": format!("https://github.com/{}/{}.git", owner, repo),
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "pushed_at": "2024-01-01T00:00:00Z",
        "default_branch": default_branch
    })
}

/// Create a mock contents entry.
fn mock_content_entry(
    owner: &str,
    repo: &str,
    dir: &str,
    name: &str,
    entry_type: &str,
) -> serde_json::Value {
    let entry_path = if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    };
    let object = if entry_type == "dir" { "trees" } else { "blobs" };
    json!({
        "name": name,
        "path": entry_path,
        "sha": "0123456789abcdef",
        "size": 42,
        "url": format!("https://api.github.com/repos/{}/{}/contents/{}", owner, repo, entry_path),
        "git_url": format!("https://api.github.com/repos/{}/{}/git/{}/0123456789abcdef", owner, repo, object),
        "download_url": null,
        "type": entry_type
    })
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

/// File entry of a mocked commit.
#[derive(Clone)]
pub struct MockFile<'a> {
    filename: &'a str,
    status: &'a str,
    with_patch: bool,
}

impl<'a> MockFile<'a> {
    /// File with 2 additions and 1 deletion.
    pub fn new(filename: &'a str, status: &'a str) -> Self {
        Self {
            filename,
            status,
            with_patch: true,
        }
    }

    /// GitHub omits `patch` for binary or very large diffs.
    pub fn without_patch(mut self) -> Self {
        self.with_patch = false;
        self
    }

    fn to_json(&self) -> serde_json::Value {
        let mut value = json!({
            "sha": "fedcba9876543210",
            "filename": self.filename,
            "status": self.status,
            "additions": 2,
            "deletions": 1,
            "changes": 3,
            "blob_url": format!("https://github.com/octo/repo/blob/abc/{}", self.filename),
        });
        if self.with_patch {
            value["patch"] = json!("@@ -1 +1,2 @@\n-old\n+new\n+more");
        }
        value
    }
}

/// wiremock-based GitHub mock server for testing.
///
/// This provides HTTP-level mocking for GitHub API endpoints, allowing tests
/// to verify actual HTTP requests rather than mocking at the client level.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to `RepositoryClient::login`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Log in against this server with a test token.
    ///
    /// A `GET /user` mock must be mounted first.
    pub async fn client(&self) -> RepositoryClient {
        let credentials = Credentials::Token {
            token: "test-token".to_string(),
            username: None,
        };
        RepositoryClient::login(credentials, &self.uri())
            .await
            .unwrap()
    }

    /// Requests received so far, in arrival order.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Mock GET /user for current user.
    pub async fn current_user(&self, login: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_user(login)))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user answering only the given Basic credentials.
    pub async fn current_user_with_basic_auth(&self, username: &str, password: &str, login: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(basic_auth(username, password))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_user(login)))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user returning a profile without `login`.
    pub async fn current_user_without_login(&self) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": null,
                "followers": 0,
                "following": 0
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user rejecting the credentials.
    pub async fn current_user_unauthorized(&self) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&self.server)
            .await;
    }

    /// Create a builder for the public repository listing of `owner`.
    pub fn user_repos<'a>(&'a self, owner: &'a str) -> MockUserReposBuilder<'a> {
        MockUserReposBuilder {
            server: &self.server,
            owner,
            repos: Vec::new(),
        }
    }

    /// Create a repository context for building mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }
}

// ============ Builder Pattern API ============

/// Builder for GET /users/{owner}/repos.
pub struct MockUserReposBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repos: Vec<serde_json::Value>,
}

impl<'a> MockUserReposBuilder<'a> {
    pub fn repo(mut self, name: &str, description: Option<&str>, default_branch: &str) -> Self {
        let id = self.repos.len() as u64 + 1;
        self.repos.push(mock_repository(
            id,
            self.owner,
            name,
            description,
            default_branch,
        ));
        self
    }

    fn endpoint(&self) -> String {
        format!("/users/{}/repos", self.owner)
    }

    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(self.repos)))
            .mount(self.server)
            .await;
    }

    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }

    /// Respond 200 with a body that is not a repository array.
    pub async fn get_malformed(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(self.server)
            .await;
    }
}

/// Repository context for building mocks.
///
/// Created via `GitHubMockServer::repo()`. Provides builders for the
/// endpoints scoped to a specific repository.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    /// Create a repository info mock builder.
    pub fn repo_info(&self) -> MockRepoInfoBuilder<'_> {
        MockRepoInfoBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            default_branch: "main",
        }
    }

    /// Create a contents mock builder for `dir` (empty for the root).
    pub fn contents(&self, dir: &'a str) -> MockContentsBuilder<'_> {
        MockContentsBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            dir,
            entries: Vec::new(),
        }
    }

    /// Create a branch mock builder.
    pub fn branch(&self, name: &'a str) -> MockBranchBuilder<'_> {
        MockBranchBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            name,
            sha: "0000000000000000000000000000000000000000",
        }
    }

    /// Create a commit mock builder.
    pub fn commit(&self, sha: &'a str) -> MockCommitBuilder<'_> {
        MockCommitBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            sha,
            message: "Test commit",
            parents: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// Builder for GET /repos/{owner}/{repo}.
pub struct MockRepoInfoBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    default_branch: &'a str,
}

impl<'a> MockRepoInfoBuilder<'a> {
    pub fn default_branch(mut self, branch: &'a str) -> Self {
        self.default_branch = branch;
        self
    }

    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}", self.owner, self.repo)))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_repository(
                1,
                self.owner,
                self.repo,
                Some("Test repository"),
                self.default_branch,
            )))
            .mount(self.server)
            .await;
    }

    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}", self.owner, self.repo)))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }
}

/// Builder for GET /repos/{owner}/{repo}/contents/{dir}.
pub struct MockContentsBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    dir: &'a str,
    entries: Vec<serde_json::Value>,
}

impl<'a> MockContentsBuilder<'a> {
    pub fn file(mut self, name: &str) -> Self {
        self.entries.push(mock_content_entry(
            self.owner, self.repo, self.dir, name, "file",
        ));
        self
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(mock_content_entry(
            self.owner, self.repo, self.dir, name, "dir",
        ));
        self
    }

    fn endpoint(&self) -> String {
        if self.dir.is_empty() {
            format!("/repos/{}/{}/contents", self.owner, self.repo)
        } else {
            format!("/repos/{}/{}/contents/{}", self.owner, self.repo, self.dir)
        }
    }

    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(self.entries)))
            .mount(self.server)
            .await;
    }

    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }
}

/// Builder for GET /repos/{owner}/{repo}/branches/{name}.
pub struct MockBranchBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    name: &'a str,
    sha: &'a str,
}

impl<'a> MockBranchBuilder<'a> {
    pub fn sha(mut self, sha: &'a str) -> Self {
        self.sha = sha;
        self
    }

    fn endpoint(&self) -> String {
        format!("/repos/{}/{}/branches/{}", self.owner, self.repo, self.name)
    }

    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": self.name,
                "commit": {
                    "sha": self.sha,
                    "url": format!("https://api.github.com/repos/{}/{}/commits/{}", self.owner, self.repo, self.sha)
                },
                "protected": false
            })))
            .mount(self.server)
            .await;
    }

    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Branch not found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(self.server)
            .await;
    }
}

/// Builder for GET /repos/{owner}/{repo}/commits/{sha}.
pub struct MockCommitBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    sha: &'a str,
    message: &'a str,
    parents: Vec<&'a str>,
    files: Vec<MockFile<'a>>,
}

impl<'a> MockCommitBuilder<'a> {
    pub fn message(mut self, message: &'a str) -> Self {
        self.message = message;
        self
    }

    pub fn parents(mut self, parents: &[&'a str]) -> Self {
        self.parents = parents.to_vec();
        self
    }

    pub fn files(mut self, files: &[MockFile<'a>]) -> Self {
        self.files = files.to_vec();
        self
    }

    fn endpoint(&self) -> String {
        format!("/repos/{}/{}/commits/{}", self.owner, self.repo, self.sha)
    }

    pub async fn get(self) {
        let parents: Vec<_> = self
            .parents
            .iter()
            .map(|sha| {
                json!({
                    "sha": sha,
                    "url": format!("https://api.github.com/repos/{}/{}/commits/{}", self.owner, self.repo, sha)
                })
            })
            .collect();
        let files: Vec<_> = self.files.iter().map(MockFile::to_json).collect();
        let total = 3 * self.files.len();

        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sha": self.sha,
                "node_id": "C_test",
                "html_url": format!("https://github.com/{}/{}/commit/{}", self.owner, self.repo, self.sha),
                "commit": {
                    "message": self.message,
                    "author": {
                        "name": "The Octocat",
                        "email": "octocat@github.com",
                        "date": "2024-01-01T00:00:00Z"
                    },
                    "committer": {
                        "name": "GitHub",
                        "email": "noreply@github.com",
                        "date": "2024-01-01T00:00:00Z"
                    }
                },
                "parents": parents,
                "stats": {
                    "additions": 2 * self.files.len(),
                    "deletions": self.files.len(),
                    "total": total
                },
                "files": files
            })))
            .mount(self.server)
            .await;
    }

    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(self.endpoint()))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "No commit found for SHA: missing",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(self.server)
            .await;
    }
}
