//! Built-in template file contents
//!
//! Rendered with Handlebars in strict mode and without HTML escaping. The
//! context is built by `ScaffoldGenerator::context`.

/// Route file: router sub-object, controller factory and the `getById` endpoint
pub const ROUTE_TEMPLATE: &str = r"import { Router } from 'express';
{{#if auth_import}}
{{auth_import}}
{{/if}}
import { {{pascal}}Controller } from '../controller/{{pascal}}Controller';
import { {{pascal}}Service } from '../service/{{pascal}}Service';
import { {{pascal}}Repository } from '../repository/{{pascal}}Repository';

const {{routes_ident}} = Router();

export const make{{pascal}}Controller = () => {
  const repository = new {{pascal}}Repository();
  const service = new {{pascal}}Service(repository);
  return new {{pascal}}Controller(service);
};

const {{camel}}Controller = make{{pascal}}Controller();

const BASE_PATH = '{{base_path}}';

{{routes_ident}}.get(`${BASE_PATH}/:{{id_field}}`{{#if auth_middleware}}, {{auth_middleware}}{{/if}}, (req, res) => {{camel}}Controller.getById(req, res));

export { {{routes_ident}} };
";

/// Controller file: delegates to the service and answers 200 JSON
pub const CONTROLLER_TEMPLATE: &str = r"import { Response{{#unless request_import}}, Request{{/unless}} } from 'express';
{{#if request_import}}
{{request_import}}
{{/if}}
import { {{pascal}}Service } from '../service/{{pascal}}Service';

export class {{pascal}}Controller {
  constructor(private {{camel}}Service: {{pascal}}Service) {}

  async getById(req: {{request_type}}, res: Response) {
    const { {{id_field}} } = req.params;
    const result = await this.{{camel}}Service.getById(Number({{id_field}}));
    return res.status(200).json(result);
  }
}
";

/// Service file: pass-through to the repository
pub const SERVICE_TEMPLATE: &str = r"import { {{pascal}}Repository } from '../repository/{{pascal}}Repository';

export class {{pascal}}Service {
  constructor(private {{camel}}Repository: {{pascal}}Repository) {}

  async getById({{id_field}}: number) {
    return this.{{camel}}Repository.getById({{id_field}});
  }
}
";

/// Repository file: stub lookup returning a canned value
pub const REPOSITORY_TEMPLATE: &str = r"{{#if database_import}}
{{database_import}}

{{/if}}
export class {{pascal}}Repository {
  async getById({{id_field}}: number) {
    console.log({ {{id_field}} });
    return { {{id_field}}: 'Ok' };
  }
}
";

/// Integration test: builds the real chain and checks the 200/JSON contract
///
/// With a custom request type the mock request carries a `user` fixture.
pub const TEST_TEMPLATE: &str = r"import { Response{{#unless request_import}}, Request{{/unless}} } from 'express';
{{#if request_import}}
{{request_import}}
{{/if}}
import { {{pascal}}Repository } from '../../src/repository/{{pascal}}Repository';
import { {{pascal}}Service } from '../../src/service/{{pascal}}Service';
import { {{pascal}}Controller } from '../../src/controller/{{pascal}}Controller';

const make{{pascal}}Controller = () => {
  const repository = new {{pascal}}Repository();
  const service = new {{pascal}}Service(repository);
  return new {{pascal}}Controller(service);
};

describe('{{title}} Integration', () => {
  let mockRequest: Partial<{{request_type}}>;
  let mockResponse: Partial<Response>;

  beforeEach(() => {
    mockRequest = {
      body: {} as any,
{{#if request_import}}
      user: { id_user: 1, id_app: 29, user_name: 'Tester' } as any,
{{/if}}
      params: { {{id_field}}: '1' },
      query: {},
    };

    mockResponse = {
      status: jest.fn().mockReturnThis(),
      json: jest.fn((param) => param),
    };
  });

  afterEach(() => {
    jest.clearAllMocks();
    jest.restoreAllMocks();
  });

  it('should be able to get {{camel}}', async () => {
    const {{camel}}Controller = make{{pascal}}Controller();
    const response = await {{camel}}Controller.getById(mockRequest as any, mockResponse as any);

    expect(response).toMatchObject({ {{id_field}}: 'Ok' });
    expect(mockResponse.json).toHaveBeenCalledWith({ {{id_field}}: 'Ok' });
    expect(mockResponse.status).toHaveBeenCalledWith(200);
  });
});
";

/// Import snippet spliced into the aggregator
pub const AGGREGATOR_IMPORT_TEMPLATE: &str =
    "import { {{routes_ident}} } from './{{camel}}.routes';\n\n";

/// Registration snippet spliced into the aggregator
pub const AGGREGATOR_REGISTRATION_TEMPLATE: &str = "{{router_ident}}.use({{routes_ident}});\n\n";
