// Copyright 2025 JiangLong.
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

use crate::infrastructure::cloudformation::tags::StackTags;
use crate::infrastructure::cloudformation::template::Template;
use crate::shared::error::Result;
use serde_json::Value;

pub trait ResourceBuilder {
    /// Handles to the declared resources needed by dependent builders.
    type Output;

    fn declare(&self, template: &mut Template) -> Result<Self::Output>;
}

pub trait TaggedResourceBuilder {
    fn stack_tags(&self) -> &StackTags;

    fn name_tag(&self) -> Option<&str> {
        None
    }

    fn cfn_tags(&self) -> Value {
        self.stack_tags().to_cfn(self.name_tag())
    }
}
