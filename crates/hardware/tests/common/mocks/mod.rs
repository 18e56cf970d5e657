//! Mock implementations of tag store collaborators.
