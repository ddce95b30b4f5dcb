use crate::errors::AppError;
use std::collections::HashSet;

#[derive(Debug)]
pub struct TemplateRenderer {
  template_context: tera::Context,
  tera: tera::Tera,

  existing_template_names: HashSet<&'static str>,
}

impl TemplateRenderer {
  pub fn new() -> Self {
    let template_context = tera::Context::default();
    let tera = tera::Tera::default();

    Self {
      template_context,
      tera,

      existing_template_names: HashSet::new(),
    }
  }

  pub fn add_context<T: serde::Serialize>(&mut self, name: &'static str, context: &T) {
    self.template_context.insert(name, context);
  }

  pub fn add_template(
    &mut self,
    template_name: &'static str,
    template_contents: &str,
  ) -> Result<(), AppError> {
    let result = self.tera.add_raw_template(template_name, template_contents);

    if result.is_ok() {
      self.existing_template_names.insert(template_name);
    }

    result.map_err(Into::into)
  }

  /// Adds templates that depend on each other, such as a layout and the pages extending it.
  pub fn add_many_templates(
    &mut self,
    names_and_templates: Vec<(&'static str, &'static str)>,
  ) -> Result<(), AppError> {
    let names: Vec<&'static str> = names_and_templates
      .iter()
      .map(|(name, _)| name)
      .cloned()
      .collect();
    let result = self.tera.add_raw_templates(names_and_templates);

    if result.is_ok() {
      self.existing_template_names.extend(names.iter());
    }

    result.map_err(Into::into)
  }

  pub fn render(&self, template_name: &'static str) -> Result<String, AppError> {
    if !self.existing_template_names.contains(template_name) {
      return Err(AppError::MissingTeraTemplate { template_name });
    }

    self
      .tera
      .render(template_name, &self.template_context)
      .map_err(Into::into)
  }
}

impl Default for TemplateRenderer {
  fn default() -> Self {
    TemplateRenderer::new()
  }
}
