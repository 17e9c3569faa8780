// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Collection and graph type declarations and their registry

pub mod registry;
pub mod types;

pub use registry::{
    ResolvedCollection, SchemaRegistry, GENERIC_COLLECTION, GENERIC_EDGES, SYSTEM_COLLECTION,
};
pub use types::{
    CollectionKind, CollectionSchema, EdgeDefinition, GraphSchema, COLLECTION_DOCUMENT_TYPE,
    COLLECTION_EDGE_TYPE, SYSTEM_PREFIX,
};
