/// Typed uniform values pushed by name

use glam::{Mat4, Vec3, Vec4};
use crate::graphics_device::{ReflectedMemberType, ScalarKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl UniformValue {
    /// Raw bytes in shader layout (column-major matrices)
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            UniformValue::Float(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Int(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec3(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec4(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Mat4(v) => bytemuck::bytes_of(v).to_vec(),
        }
    }

    /// Reflected type this value can be written to
    pub fn member_type(&self) -> ReflectedMemberType {
        match self {
            UniformValue::Float(_) => ReflectedMemberType::Scalar(ScalarKind::Float32),
            UniformValue::Int(_) => ReflectedMemberType::Scalar(ScalarKind::Int32),
            UniformValue::Vec3(_) => ReflectedMemberType::Vector(ScalarKind::Float32, 3),
            UniformValue::Vec4(_) => ReflectedMemberType::Vector(ScalarKind::Float32, 4),
            UniformValue::Mat4(_) => ReflectedMemberType::Matrix(ScalarKind::Float32, 4, 4),
        }
    }

    /// True if this value can be written to a member of type `ty`
    ///
    /// Booleans in shader interfaces are 32-bit, so `Int` also fits a
    /// `bool` member.
    pub fn fits(&self, ty: &ReflectedMemberType) -> bool {
        match (self, ty) {
            (UniformValue::Int(_), ReflectedMemberType::Scalar(ScalarKind::Bool)) => true,
            _ => self.member_type() == *ty,
        }
    }
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
