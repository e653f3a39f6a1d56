// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Pretty Codegen
//!
//! Build-time source generation for the engine's native build. Shader sources
//! are embedded into a generated header, and convention-based plugin
//! directories are turned into statically typed registration code.
//!
//! Every run fully recomputes its artifacts in memory and replaces them
//! atomically, or fails without touching the previous outputs.

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod cpp;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod registry;
pub mod scanner;
pub mod shaders;
pub mod writer;

pub use config::CodegenConfig;
pub use error::{CodegenError, Result};
pub use pipeline::{ArtifactKind, ArtifactReport, GenerationReport, Pipeline};
pub use writer::{ArtifactStatus, GeneratedArtifact};
