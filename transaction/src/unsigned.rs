//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{epoch::Epoch, SubstateRequirement};

use crate::instruction::Instruction;

/// A transaction before signing. Mutated only through the builder, which
/// clears any signature when the contents change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub fee_instructions: Vec<Instruction>,
    pub instructions: Vec<Instruction>,
    /// Substates the instructions read without consuming, e.g. the resource
    /// definition of a transferred resource.
    pub input_refs: IndexSet<SubstateRequirement>,
    pub min_epoch: Option<Epoch>,
    pub max_epoch: Option<Epoch>,
}

impl UnsignedTransaction {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn fee_instructions(&self) -> &[Instruction] {
        &self.fee_instructions
    }

    pub fn input_refs(&self) -> &IndexSet<SubstateRequirement> {
        &self.input_refs
    }
}
