//! GameObject 组件容器
//!
//! 管理游戏对象的组件、变换和子对象

use super::{Component, Transform};
use crate::core::log::CORE_TARGET;
use crate::math::Matrix4;
use std::any::{Any, TypeId};

/// 组件存储包装器
///
/// 用于在 GameObject 中存储不同类型的组件
struct ComponentBox {
    /// 组件实例（使用 Box<dyn Any> 实现类型擦除）
    component: Box<dyn Any>,
    /// 组件类型 ID
    type_id: TypeId,
}

/// GameObject - 游戏对象
///
/// 作为组件容器，可以添加、移除和查询组件。每个对象都有自己的 [`Transform`]，
/// 子对象按添加顺序排列，其变换相对于父对象。
pub struct GameObject {
    /// 游戏对象名称
    name: String,

    /// 是否激活
    ///
    /// 未激活的对象及其整个子树在默认查询中被跳过
    pub active: bool,

    /// 局部变换
    transform: Transform,

    /// 附加的组件列表
    components: Vec<ComponentBox>,

    /// 子对象
    children: Vec<GameObject>,
}

impl GameObject {
    /// 创建新的 GameObject
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            transform: Transform::default(),
            components: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 创建带指定变换的 GameObject
    pub fn with_transform(name: impl Into<String>, transform: Transform) -> Self {
        let mut go = Self::new(name);
        go.transform = transform;
        go
    }

    /// 设置名称
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 获取名称
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    // ========== 组件管理 ==========

    /// 添加组件
    ///
    /// # 示例
    /// ```
    /// use unitoolz::component::{GameObject, MeshRenderer};
    ///
    /// let mut go = GameObject::new("Crate");
    /// go.add_component(MeshRenderer::unit_cube());
    /// assert!(go.has_component::<MeshRenderer>());
    /// ```
    pub fn add_component<T: Component>(&mut self, component: T) {
        tracing::trace!(
            target: CORE_TARGET,
            object = %self.name,
            component = component.type_name(),
            "component added"
        );
        self.components.push(ComponentBox {
            component: Box::new(component),
            type_id: TypeId::of::<T>(),
        });
    }

    /// 添加组件（链式调用）
    pub fn with_component<T: Component>(mut self, component: T) -> Self {
        self.add_component(component);
        self
    }

    /// 移除第一个指定类型的组件
    ///
    /// # 返回
    /// 如果找到并移除了组件，返回 `true`；否则返回 `false`
    pub fn remove_component<T: Component>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();

        if let Some(index) = self.components.iter().position(|c| c.type_id == type_id) {
            self.components.remove(index);
            true
        } else {
            false
        }
    }

    /// 获取组件的不可变引用
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components_of::<T>().next()
    }

    /// 获取组件的可变引用
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        let type_id = TypeId::of::<T>();

        self.components
            .iter_mut()
            .find(|c| c.type_id == type_id)
            .and_then(|c| c.component.downcast_mut::<T>())
    }

    /// 获取此对象上所有指定类型的组件
    pub fn get_components<T: Component>(&self) -> Vec<&T> {
        self.components_of::<T>().collect()
    }

    pub(crate) fn components_of<T: Component>(&self) -> impl Iterator<Item = &T> + '_ {
        let type_id = TypeId::of::<T>();

        self.components
            .iter()
            .filter(move |c| c.type_id == type_id)
            .filter_map(|c| c.component.downcast_ref::<T>())
    }

    /// 检查是否有指定类型的组件
    pub fn has_component<T: Component>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.components.iter().any(|c| c.type_id == type_id)
    }

    /// 获取组件数量
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ========== 层级管理 ==========

    /// 添加子对象，返回子对象的可变引用
    pub fn add_child(&mut self, child: GameObject) -> &mut GameObject {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// 添加子对象（链式调用）
    pub fn with_child(mut self, child: GameObject) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[GameObject] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// 按名称查找直接子对象
    pub fn find_child(&self, name: &str) -> Option<&GameObject> {
        self.children.iter().find(|c| c.name == name)
    }

    /// 按名称查找直接子对象的可变引用
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// 此对象作为层级根时的世界矩阵
    pub fn world_matrix(&self) -> Matrix4 {
        self.transform.local_matrix()
    }

    /// 深度优先先序遍历此对象及其所有后代
    ///
    /// `include_inactive` 为 `false` 时，未激活的对象及其子树被跳过。
    /// 回调同时收到对象的世界矩阵（以 `self` 为根）。
    pub(crate) fn visit<'a, F>(&'a self, include_inactive: bool, f: &mut F)
    where
        F: FnMut(&'a GameObject, &Matrix4),
    {
        self.visit_with_parent(&Matrix4::identity(), include_inactive, f);
    }

    /// 深度优先先序查找，回调第一次返回 `Some` 时立即停止
    ///
    /// `include_inactive` 的含义与 [`visit`](GameObject::visit) 相同。
    pub(crate) fn find_map<'a, U, F>(&'a self, include_inactive: bool, f: &mut F) -> Option<U>
    where
        F: FnMut(&'a GameObject) -> Option<U>,
    {
        if !include_inactive && !self.active {
            return None;
        }

        f(self).or_else(|| {
            self.children
                .iter()
                .find_map(|child| child.find_map(include_inactive, f))
        })
    }

    fn visit_with_parent<'a, F>(&'a self, parent_world: &Matrix4, include_inactive: bool, f: &mut F)
    where
        F: FnMut(&'a GameObject, &Matrix4),
    {
        if !include_inactive && !self.active {
            return;
        }

        let world = parent_world * self.transform.local_matrix();
        f(self, &world);

        for child in &self.children {
            child.visit_with_parent(&world, include_inactive, f);
        }
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new("GameObject")
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("components", &self.components.len())
            .field("children", &self.children)
            .finish()
    }
}
