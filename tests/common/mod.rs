#![allow(dead_code)]

use git2::{Repository, RepositoryInitOptions, Signature};
use std::path::Path;

/// Initialize a repository on `master` with a single commit.
pub fn init_repo(dir: &Path) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("master");
    let repo = Repository::init_opts(dir, &opts).unwrap();

    std::fs::write(dir.join("repository_file.txt"), "Hello World").unwrap();
    {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("repository_file.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            "Initial commit",
            &tree,
            &[],
        )
        .unwrap();
    }

    repo
}

pub fn create_tag(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false).unwrap();
}

pub fn create_branch(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, false).unwrap();
}

/// Create `refs/remotes/<remote>/<branch>` at HEAD without a real remote.
pub fn create_remote_branch(repo: &Repository, remote: &str, branch: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.reference(
        &format!("refs/remotes/{}/{}", remote, branch),
        head.id(),
        true,
        "test remote branch",
    )
    .unwrap();
}
