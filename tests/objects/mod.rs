mod mktree_builds_git_compatible_trees;
